//! 自由文本数值提取
//!
//! 从聊天消息中尽力提取体重/身高等数值字段（"My weight is 70 kg and
//! height is 175 cm"）。找不到必需字段时返回解析错误，由调用方
//! 引导用户补全。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, Result};

static WEIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*kg").expect("invalid weight regex"));

static HEIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*cm").expect("invalid height regex"));

/// 热量计算涉及的字段关键词
const CALORIE_FIELD_KEYWORDS: [&str; 5] = ["age", "weight", "height", "gender", "activity"];

/// 从文本中提取到的 BMI 输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiInput {
    /// 体重（公斤）
    pub weight_kg: f64,
    /// 身高（厘米）
    pub height_cm: f64,
}

/// 提取体重和身高（BMI 需要两者）
pub fn parse_bmi_input(text: &str) -> Result<BmiInput> {
    let weight_kg = capture_number(&WEIGHT_RE, text)
        .ok_or_else(|| AppError::Parse("no weight in kilograms found".to_string()))?;
    let height_cm = capture_number(&HEIGHT_RE, text)
        .ok_or_else(|| AppError::Parse("no height in centimeters found".to_string()))?;

    Ok(BmiInput {
        weight_kg,
        height_cm,
    })
}

/// 提取体重（饮水量计算只需要体重）
pub fn parse_weight(text: &str) -> Result<f64> {
    capture_number(&WEIGHT_RE, text)
        .ok_or_else(|| AppError::Parse("no weight in kilograms found".to_string()))
}

/// 文本是否提到热量计算相关字段
///
/// 热量计算需要五个字段，自由文本提取不可靠，只做触发检测，
/// 由调用方引导用户走结构化表单。
pub fn mentions_calorie_fields(text: &str) -> bool {
    let lower = text.to_lowercase();
    CALORIE_FIELD_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn capture_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bmi_input() {
        let input = parse_bmi_input("My weight is 70 kg and height is 175 cm").unwrap();
        assert_eq!(input.weight_kg, 70.0);
        assert_eq!(input.height_cm, 175.0);
    }

    #[test]
    fn test_parse_bmi_input_decimal_values() {
        let input = parse_bmi_input("weight 72.5kg height 168.5cm").unwrap();
        assert_eq!(input.weight_kg, 72.5);
        assert_eq!(input.height_cm, 168.5);
    }

    #[test]
    fn test_parse_bmi_missing_height_is_parse_error() {
        assert!(matches!(
            parse_bmi_input("I weigh 70 kg"),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_bmi_missing_everything_is_parse_error() {
        assert!(matches!(
            parse_bmi_input("calculate my bmi please"),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("I weigh 82 kg").unwrap(), 82.0);
        assert!(matches!(
            parse_weight("how much water should I drink"),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_weight_case_insensitive_unit() {
        assert_eq!(parse_weight("around 90 KG or so").unwrap(), 90.0);
    }

    #[test]
    fn test_mentions_calorie_fields() {
        assert!(mentions_calorie_fields("my age is 25 and my weight is 70"));
        assert!(!mentions_calorie_fields("hello there"));
    }
}
