//! 健康工具 DTO
//!
//! 定义 BMI、饮水量、热量计算器的请求和响应数据结构。
//! 请求使用结构化数值字段；自由文本提取走聊天接口。

use serde::{Deserialize, Serialize};

/// BMI 计算请求
#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    /// 体重（公斤）
    pub weight_kg: f64,
    /// 身高（厘米）
    pub height_cm: f64,
}

/// BMI 计算响应
#[derive(Debug, Serialize)]
pub struct BmiResponse {
    /// BMI 值
    pub bmi: f64,
    /// 所属区间
    pub category: String,
    /// 健康建议
    pub advice: String,
    /// 用户可读消息
    pub message: String,
}

/// 饮水量计算请求
#[derive(Debug, Deserialize)]
pub struct WaterRequest {
    /// 体重（公斤）
    pub weight_kg: f64,
    /// 活动水平（缺省为 moderate）
    pub activity: Option<String>,
}

/// 饮水量计算响应
#[derive(Debug, Serialize)]
pub struct WaterResponse {
    /// 每日推荐饮水量（升）
    pub water_liters: f64,
    /// 折合 250 毫升杯数
    pub water_glasses: u32,
    /// 用户可读消息
    pub message: String,
}

/// 热量计算请求
#[derive(Debug, Deserialize)]
pub struct CalorieRequest {
    /// 年龄
    pub age: u32,
    /// 体重（公斤）
    pub weight_kg: f64,
    /// 身高（厘米）
    pub height_cm: f64,
    /// 性别：male / female
    pub sex: String,
    /// 活动水平（缺省为 moderate）
    pub activity: Option<String>,
}

/// 热量计算响应
#[derive(Debug, Serialize)]
pub struct CalorieResponse {
    /// 维持体重热量（千卡/天）
    pub maintenance_calories: i64,
    /// 减重热量
    pub weight_loss_calories: i64,
    /// 增重热量
    pub weight_gain_calories: i64,
    /// 基础代谢率
    pub bmr: i64,
    /// 用户可读消息
    pub message: String,
}
