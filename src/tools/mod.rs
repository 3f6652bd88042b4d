//! 健康计算工具模块
//!
//! BMI、每日饮水量、每日热量三个纯函数计算器，以及从自由文本中
//! 提取数值字段的解析器。

pub mod calculators;
pub mod parse;

pub use calculators::{
    ActivityLevel, BmiBand, BmiReport, CalorieReport, Sex, WaterReport, calculate_bmi,
    calculate_daily_calories, calculate_water_intake,
};
pub use parse::{BmiInput, parse_bmi_input, parse_weight};
