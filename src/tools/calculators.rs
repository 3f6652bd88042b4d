//! 健康计算器
//!
//! 全部为单遍纯函数：数值输入 → 结构化结果。输入超出合理范围时
//! 返回验证错误，由调用方提示用户修正。

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// 每公斤体重的基础饮水量（毫升）
const WATER_ML_PER_KG: f64 = 33.0;

/// 一杯水的容量（毫升）
const GLASS_ML: f64 = 250.0;

/// 活动水平
///
/// 饮水量和热量计算共用同一枚举，乘数各自固定（行为兼容保留的
/// 经验值，无权威出处）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// 久坐，基本不运动
    Sedentary,
    /// 轻度运动（每周 1-3 天）
    Light,
    /// 中度运动（每周 3-5 天）
    Moderate,
    /// 高强度运动（每周 6-7 天）
    Active,
    /// 极高强度运动或体力劳动
    VeryActive,
}

impl ActivityLevel {
    /// 从文本解析活动水平，无法识别时回退到中度
    pub fn parse_or_default(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "sedentary" => Self::Sedentary,
            "light" => Self::Light,
            "moderate" => Self::Moderate,
            "active" => Self::Active,
            "very_active" | "very active" => Self::VeryActive,
            _ => Self::Moderate,
        }
    }

    /// 饮水量乘数
    pub fn water_multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.0,
            Self::Light => 1.1,
            Self::Moderate => 1.2,
            Self::Active => 1.3,
            Self::VeryActive => 1.4,
        }
    }

    /// 热量（TDEE）乘数
    pub fn calorie_multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    /// 人类可读标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very active",
        }
    }
}

/// 性别（Mifflin-St Jeor 公式按性别取不同常数项）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// 从文本解析性别
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(AppError::Validation(format!(
                "Please specify sex as 'male' or 'female', got '{}'",
                other
            ))),
        }
    }
}

/// BMI 区间
///
/// 对 [0, ∞) 的完整划分：下界含、上界不含。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiBand {
    /// BMI < 18.5
    Underweight,
    /// 18.5 <= BMI < 25
    Normal,
    /// 25 <= BMI < 30
    Overweight,
    /// BMI >= 30
    Obese,
}

impl BmiBand {
    /// 按 BMI 值分类
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// 人类可读标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    /// 对应的健康建议
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Underweight => {
                "You may need to gain weight. Consult a healthcare provider for guidance."
            }
            Self::Normal => "Great! You're in the healthy weight range. Keep up the good habits!",
            Self::Overweight => {
                "Consider a balanced diet and regular exercise. Consult a healthcare provider."
            }
            Self::Obese => {
                "It's recommended to speak with a healthcare provider about weight management strategies."
            }
        }
    }
}

/// BMI 计算结果
#[derive(Debug, Clone, Serialize)]
pub struct BmiReport {
    /// BMI 值（保留一位小数）
    pub bmi: f64,
    /// 所属区间
    pub band: BmiBand,
    /// 健康建议
    pub advice: &'static str,
    /// 用户可读消息
    pub message: String,
}

/// 饮水量计算结果
#[derive(Debug, Clone, Serialize)]
pub struct WaterReport {
    /// 每日推荐饮水量（升，保留一位小数）
    pub liters: f64,
    /// 折合 250 毫升杯数
    pub glasses: u32,
    /// 用户可读消息
    pub message: String,
}

/// 热量计算结果
#[derive(Debug, Clone, Serialize)]
pub struct CalorieReport {
    /// 维持体重热量（千卡/天）
    pub maintenance: i64,
    /// 减重热量（维持 - 500）
    pub weight_loss: i64,
    /// 增重热量（维持 + 300）
    pub weight_gain: i64,
    /// 基础代谢率（千卡/天）
    pub bmr: i64,
    /// 用户可读消息
    pub message: String,
}

/// 计算 BMI：weight_kg / height_m²
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> Result<BmiReport> {
    if !weight_kg.is_finite() || !height_m.is_finite() || weight_kg <= 0.0 || height_m <= 0.0 {
        return Err(AppError::Validation(
            "Weight and height must be positive numbers.".to_string(),
        ));
    }

    if !(0.5..=2.5).contains(&height_m) {
        return Err(AppError::Validation(
            "Height seems incorrect. Please enter height in centimeters (e.g., 170 cm)."
                .to_string(),
        ));
    }

    if !(20.0..=300.0).contains(&weight_kg) {
        return Err(AppError::Validation(
            "Weight seems incorrect. Please enter weight in kilograms (e.g., 70 kg).".to_string(),
        ));
    }

    let bmi = round1(weight_kg / (height_m * height_m));
    let band = BmiBand::classify(bmi);
    let advice = band.advice();

    let message = format!(
        "Your BMI is {} ({}). {} Note: BMI doesn't account for muscle mass, bone density, or \
body composition; it's one health indicator among many.",
        bmi,
        band.label(),
        advice
    );

    Ok(BmiReport {
        bmi,
        band,
        advice,
        message,
    })
}

/// 计算每日推荐饮水量：33 mL × 体重(kg) × 活动乘数
pub fn calculate_water_intake(weight_kg: f64, activity: ActivityLevel) -> Result<WaterReport> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AppError::Validation(
            "Weight must be a positive number.".to_string(),
        ));
    }

    if !(20.0..=300.0).contains(&weight_kg) {
        return Err(AppError::Validation(
            "Weight seems incorrect. Please enter weight in kilograms (e.g., 70 kg).".to_string(),
        ));
    }

    let total_ml = WATER_ML_PER_KG * weight_kg * activity.water_multiplier();
    let liters = round1(total_ml / 1000.0);
    let glasses = (total_ml / GLASS_ML).round() as u32;

    let message = format!(
        "Daily water recommendation for a {} kg person with {} activity level: {} liters \
({} glasses of 250 ml). Drink more in hot weather or during intense exercise, and spread \
intake throughout the day.",
        weight_kg,
        activity.label(),
        liters,
        glasses
    );

    Ok(WaterReport {
        liters,
        glasses,
        message,
    })
}

/// 计算每日热量需求（Mifflin-St Jeor 公式）
///
/// BMR = 10×体重 + 6.25×身高(cm) − 5×年龄 + 5（男）/ − 161（女），
/// TDEE = BMR × 活动乘数。
pub fn calculate_daily_calories(
    age: u32,
    weight_kg: f64,
    height_cm: f64,
    sex: Sex,
    activity: ActivityLevel,
) -> Result<CalorieReport> {
    if !(15..=100).contains(&age) {
        return Err(AppError::Validation(
            "Please provide a valid age between 15 and 100.".to_string(),
        ));
    }

    if !weight_kg.is_finite() || !height_cm.is_finite() || weight_kg <= 0.0 || height_cm <= 0.0 {
        return Err(AppError::Validation(
            "Weight and height must be positive numbers.".to_string(),
        ));
    }

    let sex_constant = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };

    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64 + sex_constant;
    let maintenance = (bmr * activity.calorie_multiplier()).round() as i64;
    let weight_loss = maintenance - 500;
    let weight_gain = maintenance + 300;
    let bmr = bmr.round() as i64;

    let message = format!(
        "Daily calorie needs ({:?}, {} years, {} activity): maintain weight {} kcal/day, \
lose weight {} kcal/day, gain weight {} kcal/day, BMR at rest {} kcal/day. These are \
estimates; adjust based on results.",
        sex,
        age,
        activity.label(),
        maintenance,
        weight_loss,
        weight_gain,
        bmr
    );

    Ok(CalorieReport {
        maintenance,
        weight_loss,
        weight_gain,
        bmr,
        message,
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_bmi_reference_case() {
        // 70 / 1.75^2 = 22.857... -> 22.9, normal weight
        let report = calculate_bmi(70.0, 1.75).unwrap();
        assert_eq!(report.bmi, 22.9);
        assert_eq!(report.band, BmiBand::Normal);
    }

    #[rstest]
    #[case(18.4, BmiBand::Underweight)]
    #[case(18.5, BmiBand::Normal)]
    #[case(24.9, BmiBand::Normal)]
    #[case(25.0, BmiBand::Overweight)]
    #[case(29.9, BmiBand::Overweight)]
    #[case(30.0, BmiBand::Obese)]
    #[case(45.0, BmiBand::Obese)]
    #[case(0.0, BmiBand::Underweight)]
    fn test_bmi_band_boundaries(#[case] bmi: f64, #[case] expected: BmiBand) {
        assert_eq!(BmiBand::classify(bmi), expected);
    }

    #[test]
    fn test_bmi_banding_is_a_partition() {
        // Every positive (weight, height) pair lands in exactly one band.
        let mut bmi = 0.0;
        while bmi < 80.0 {
            let bands = [
                BmiBand::Underweight,
                BmiBand::Normal,
                BmiBand::Overweight,
                BmiBand::Obese,
            ];
            let hits = bands
                .iter()
                .filter(|b| BmiBand::classify(bmi) == **b)
                .count();
            assert_eq!(hits, 1, "bmi {} fell into {} bands", bmi, hits);
            bmi += 0.1;
        }
    }

    #[rstest]
    #[case(0.0, 1.75)]
    #[case(-5.0, 1.75)]
    #[case(70.0, 0.0)]
    #[case(70.0, 3.0)]
    #[case(10.0, 1.75)]
    #[case(500.0, 1.75)]
    fn test_bmi_rejects_out_of_range(#[case] weight: f64, #[case] height: f64) {
        assert!(matches!(
            calculate_bmi(weight, height),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_water_reference_case() {
        // 70 * 33 * 1.2 = 2772 ml -> 2.8 liters, 11 glasses
        let report = calculate_water_intake(70.0, ActivityLevel::Moderate).unwrap();
        assert_eq!(report.liters, 2.8);
        assert_eq!(report.glasses, 11);
    }

    #[test]
    fn test_water_scales_with_weight() {
        let mut previous = 0.0;
        for weight in [40.0, 60.0, 80.0, 100.0, 120.0] {
            let report = calculate_water_intake(weight, ActivityLevel::Light).unwrap();
            assert!(report.liters > previous);
            previous = report.liters;
        }
    }

    #[test]
    fn test_water_scales_with_activity() {
        let sedentary = calculate_water_intake(70.0, ActivityLevel::Sedentary).unwrap();
        let very_active = calculate_water_intake(70.0, ActivityLevel::VeryActive).unwrap();
        assert!(very_active.liters > sedentary.liters);
    }

    #[test]
    fn test_calories_reference_case_male() {
        // BMR = 10*70 + 6.25*175 - 5*25 + 5 = 1673.75
        // TDEE (moderate) = 1673.75 * 1.55 = 2594.3 -> 2594
        let report =
            calculate_daily_calories(25, 70.0, 175.0, Sex::Male, ActivityLevel::Moderate).unwrap();
        assert_eq!(report.bmr, 1674);
        assert_eq!(report.maintenance, 2594);
        assert_eq!(report.weight_loss, 2094);
        assert_eq!(report.weight_gain, 2894);
    }

    #[test]
    fn test_calories_reference_case_female() {
        // BMR = 10*60 + 6.25*165 - 5*30 - 161 = 1320.25
        let report = calculate_daily_calories(30, 60.0, 165.0, Sex::Female, ActivityLevel::Sedentary)
            .unwrap();
        assert_eq!(report.bmr, 1320);
        assert_eq!(report.maintenance, (1320.25_f64 * 1.2).round() as i64);
    }

    #[test]
    fn test_calories_scale_with_weight() {
        let mut previous = 0;
        for weight in [50.0, 70.0, 90.0, 110.0] {
            let report =
                calculate_daily_calories(40, weight, 170.0, Sex::Male, ActivityLevel::Moderate)
                    .unwrap();
            assert!(report.maintenance > previous);
            previous = report.maintenance;
        }
    }

    #[rstest]
    #[case(14)]
    #[case(101)]
    fn test_calories_reject_invalid_age(#[case] age: u32) {
        assert!(matches!(
            calculate_daily_calories(age, 70.0, 175.0, Sex::Male, ActivityLevel::Moderate),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_activity_level_parsing() {
        assert_eq!(
            ActivityLevel::parse_or_default("very_active"),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            ActivityLevel::parse_or_default("SEDENTARY"),
            ActivityLevel::Sedentary
        );
        // Unknown levels fall back to moderate.
        assert_eq!(
            ActivityLevel::parse_or_default("extreme"),
            ActivityLevel::Moderate
        );
    }

    #[test]
    fn test_sex_parsing() {
        assert_eq!(Sex::parse("Male").unwrap(), Sex::Male);
        assert_eq!(Sex::parse("f").unwrap(), Sex::Female);
        assert!(Sex::parse("other").is_err());
    }
}
