//! 消息调度器
//!
//! 在应答解析器之前做一层关键词分流：营养查询、运动建议、名言、
//! 小贴士和计算器请求走各自的处理路径，其余交给解析器。
//! 检查顺序固定，先命中者先处理。

use std::sync::Arc;

use crate::engine::resolver::ResponseResolver;
use crate::integrations::{ExerciseClient, NutritionClient, WellnessProvider};
use crate::tools::calculators::{ActivityLevel, calculate_bmi, calculate_water_intake};
use crate::tools::parse::{parse_bmi_input, parse_weight};

/// 触发营养查询的前缀表达
const NUTRITION_KEYWORDS: [&str; 4] = [
    "calories in",
    "nutrition of",
    "nutrition in",
    "nutritional value of",
];

/// 触发运动建议的前缀表达
const EXERCISE_KEYWORDS: [&str; 4] = [
    "exercises for",
    "workout for",
    "show me exercises",
    "exercise suggestions",
];

const QUOTE_KEYWORDS: [&str; 3] = ["quote", "inspire me", "motivation"];

const TIP_KEYWORDS: [&str; 3] = ["wellness tip", "health tip", "daily tip"];

const WATER_KEYWORDS: [&str; 3] = ["water intake", "how much water", "daily water"];

const CALORIE_KEYWORDS: [&str; 3] = ["calculate calories", "daily calories", "calorie needs"];

/// 每次运动建议返回的条数
const EXERCISE_LIMIT: usize = 5;

/// 缺少 BMI 输入字段时的引导语
const BMI_PROMPT: &str = "To calculate your BMI, please tell me: 'My weight is [X] kg and \
height is [Y] cm'. For example: 'My weight is 70 kg and height is 175 cm'.";

/// 缺少体重时的引导语
const WATER_PROMPT: &str = "To calculate your daily water needs, please tell me: 'I weigh \
[X] kg'. For example: 'I weigh 70 kg'.";

/// 热量计算的引导语（字段较多，引导用户走结构化表单）
const CALORIE_PROMPT: &str = "To calculate your daily calorie needs I'll need your age, \
weight (kg), height (cm), sex (male/female) and activity level. Please use the calorie \
calculator endpoint with those fields.";

/// 消息调度器
pub struct Dispatcher {
    resolver: Arc<ResponseResolver>,
    nutrition: NutritionClient,
    exercise: ExerciseClient,
    wellness: WellnessProvider,
}

impl Dispatcher {
    /// 创建调度器
    pub fn new(
        resolver: Arc<ResponseResolver>,
        nutrition: NutritionClient,
        exercise: ExerciseClient,
        wellness: WellnessProvider,
    ) -> Self {
        Self {
            resolver,
            nutrition,
            exercise,
            wellness,
        }
    }

    /// 处理一条用户消息，总是返回一条回复
    pub async fn dispatch(&self, message: &str) -> String {
        let lower = message.to_lowercase();

        // 1. 营养查询（外部 API）
        for keyword in NUTRITION_KEYWORDS {
            if lower.contains(keyword) {
                let food = lower.replace(keyword, "");
                let food = food.trim();
                if !food.is_empty() {
                    return self.nutrition.lookup(food).await;
                }
            }
        }

        // 2. 运动建议（外部 API）
        for keyword in EXERCISE_KEYWORDS {
            if lower.contains(keyword) {
                let body_part = lower.replace(keyword, "").replace("my", "");
                let body_part = body_part.trim();
                if !body_part.is_empty() {
                    return self.exercise.suggest(body_part, EXERCISE_LIMIT).await;
                }
            }
        }

        // 3. 励志名言
        if QUOTE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return self.wellness.motivational_quote().await;
        }

        // 4. 健康小贴士
        if TIP_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return self.wellness.wellness_tip();
        }

        // 5. BMI 计算器（自由文本提取，字段缺失时引导补全）
        if lower.contains("bmi") || lower.contains("body mass index") {
            return match parse_bmi_input(message) {
                Ok(input) => match calculate_bmi(input.weight_kg, input.height_cm / 100.0) {
                    Ok(report) => report.message,
                    Err(e) => e.to_string(),
                },
                Err(_) => BMI_PROMPT.to_string(),
            };
        }

        // 6. 饮水量计算器
        if WATER_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return match parse_weight(message) {
                Ok(weight) => match calculate_water_intake(weight, ActivityLevel::Moderate) {
                    Ok(report) => report.message,
                    Err(e) => e.to_string(),
                },
                Err(_) => WATER_PROMPT.to_string(),
            };
        }

        // 7. 热量计算器（字段过多，引导走结构化接口）
        if CALORIE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return CALORIE_PROMPT.to_string();
        }

        // 8. 其余交给应答解析器
        self.resolver.resolve(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::ExternalApiConfig;
    use crate::engine::matcher::Matcher;
    use crate::knowledge::records::IntentRecord;
    use crate::knowledge::store::KnowledgeStore;

    fn dispatcher() -> Dispatcher {
        let store = Arc::new(KnowledgeStore {
            intents: vec![IntentRecord {
                tag: "greeting".into(),
                patterns: vec!["hi".into(), "hello".into()],
                responses: vec!["Hi there!".into()],
            }],
            ..KnowledgeStore::default()
        });
        let resolver = Arc::new(ResponseResolver::with_seed(store, Matcher::new(), 3));

        // Unset API keys: external paths degrade without touching the network.
        let external = ExternalApiConfig {
            request_timeout: 1,
            ..ExternalApiConfig::default()
        };

        Dispatcher::new(
            resolver,
            NutritionClient::new(&external),
            ExerciseClient::new(&external),
            WellnessProvider::new(&external),
        )
    }

    #[tokio::test]
    async fn test_plain_message_goes_to_resolver() {
        assert_eq!(dispatcher().dispatch("hello").await, "Hi there!");
    }

    #[tokio::test]
    async fn test_bmi_with_fields_computes() {
        let reply = dispatcher()
            .dispatch("calculate my BMI, my weight is 70 kg and height is 175 cm")
            .await;
        assert!(reply.contains("Your BMI is 22.9"));
    }

    #[tokio::test]
    async fn test_bmi_without_fields_prompts() {
        let reply = dispatcher().dispatch("what is my bmi").await;
        assert_eq!(reply, BMI_PROMPT);
    }

    #[tokio::test]
    async fn test_water_with_weight_computes() {
        let reply = dispatcher()
            .dispatch("how much water should I drink? I weigh 70 kg")
            .await;
        assert!(reply.contains("2.8 liters"));
    }

    #[tokio::test]
    async fn test_water_without_weight_prompts() {
        let reply = dispatcher().dispatch("how much water should I drink").await;
        assert_eq!(reply, WATER_PROMPT);
    }

    #[tokio::test]
    async fn test_calorie_request_prompts_for_form() {
        let reply = dispatcher().dispatch("please calculate calories for me").await;
        assert_eq!(reply, CALORIE_PROMPT);
    }

    #[tokio::test]
    async fn test_nutrition_without_key_degrades() {
        let reply = dispatcher().dispatch("calories in apple").await;
        assert!(reply.contains("unavailable"));
    }

    #[tokio::test]
    async fn test_wellness_tip_is_served_locally() {
        let reply = dispatcher().dispatch("give me a health tip").await;
        assert!(!reply.is_empty());
        assert_ne!(reply, "Hi there!");
    }
}
