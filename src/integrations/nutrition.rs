//! 营养信息查询
//!
//! 调用 USDA FoodData Central 食品搜索接口，把返回的营养成分
//! 格式化为用户可读文本。接口不可用时回退到内置的常见食品表。

use serde::Deserialize;
use tracing::warn;

use crate::config::config::ExternalApiConfig;
use crate::integrations::build_http_client;

/// USDA 营养成分名到显示名的映射
const NUTRIENT_MAPPING: [(&str, &str); 12] = [
    ("Energy", "Calories"),
    ("Carbohydrate, by difference", "Carbohydrates"),
    ("Protein", "Protein"),
    ("Total lipid (fat)", "Fat"),
    ("Fiber, total dietary", "Fiber"),
    ("Sugars, total including NLEA", "Sugars"),
    ("Vitamin C, total ascorbic acid", "Vitamin C"),
    ("Vitamin A, IU", "Vitamin A"),
    ("Calcium, Ca", "Calcium"),
    ("Iron, Fe", "Iron"),
    ("Sodium, Na", "Sodium"),
    ("Alcohol, ethyl", "Alcohol"),
];

/// 展示顺序
const PRIORITY_ORDER: [&str; 12] = [
    "Calories",
    "Carbohydrates",
    "Protein",
    "Fat",
    "Fiber",
    "Sugars",
    "Sodium",
    "Vitamin C",
    "Vitamin A",
    "Calcium",
    "Iron",
    "Alcohol",
];

/// 内置常见食品营养表（接口不可用时的回退数据）
const COMMON_FOODS: [(&str, &str); 5] = [
    (
        "apple",
        "Apple (per 100g): Calories 52 kcal, Carbs 14 g, Fiber 2.4 g, Sugar 10 g, Protein 0.3 g, Fat 0.2 g",
    ),
    (
        "banana",
        "Banana (per 100g): Calories 89 kcal, Carbs 23 g, Fiber 2.6 g, Sugar 12 g, Protein 1.1 g, Fat 0.3 g",
    ),
    (
        "chicken",
        "Chicken Breast (per 100g): Calories 165 kcal, Protein 31 g, Fat 3.6 g, Carbs 0 g",
    ),
    (
        "rice",
        "White Rice (per 100g, cooked): Calories 130 kcal, Carbs 28 g, Protein 2.7 g, Fat 0.3 g",
    ),
    (
        "egg",
        "Egg (per 100g): Calories 155 kcal, Protein 13 g, Fat 11 g, Carbs 1.1 g",
    ),
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<Food>,
}

#[derive(Debug, Deserialize)]
struct Food {
    #[serde(default)]
    description: String,
    #[serde(default, rename = "foodNutrients")]
    food_nutrients: Vec<Nutrient>,
}

#[derive(Debug, Deserialize)]
struct Nutrient {
    #[serde(default, rename = "nutrientName")]
    nutrient_name: String,
    #[serde(default)]
    value: f64,
    #[serde(default, rename = "unitName")]
    unit_name: String,
}

/// USDA FoodData Central 客户端
#[derive(Debug, Clone)]
pub struct NutritionClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl NutritionClient {
    /// 按外部 API 配置创建客户端
    pub fn new(config: &ExternalApiConfig) -> Self {
        Self {
            http: build_http_client(config.request_timeout),
            api_key: config.usda_api_key.clone(),
            base_url: config.usda_api_url.clone(),
        }
    }

    /// 查询食品营养信息，总是返回用户可读文本
    pub async fn lookup(&self, food_name: &str) -> String {
        let Some(api_key) = &self.api_key else {
            return "Nutrition lookup is currently unavailable (no API key configured). \
Ask me about common foods like apple, banana, chicken, rice, or egg instead."
                .to_string();
        };

        let url = format!(
            "{}?api_key={}&query={}",
            self.base_url,
            api_key,
            urlencoding::encode(food_name)
        );

        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("USDA API request failed: {}", e);
                return fallback_nutrition(food_name);
            }
        };

        if !response.status().is_success() {
            warn!("USDA API returned status {}", response.status());
            return fallback_nutrition(food_name);
        }

        let data: SearchResponse = match response.json().await {
            Ok(d) => d,
            Err(e) => {
                warn!("USDA API returned invalid body: {}", e);
                return fallback_nutrition(food_name);
            }
        };

        let Some(food) = data.foods.first() else {
            return format!(
                "Sorry, I couldn't find nutrition details for '{}'. Try: apple, banana, \
chicken, rice, or egg.",
                food_name
            );
        };

        match format_food(food, food_name) {
            Some(text) => text,
            None => fallback_nutrition(food_name),
        }
    }
}

/// 把一条食品记录格式化为营养清单，无可识别成分时返回 None
fn format_food(food: &Food, food_name: &str) -> Option<String> {
    let mut found: Vec<(&str, String)> = Vec::new();

    for nutrient in &food.food_nutrients {
        for (api_name, display_name) in NUTRIENT_MAPPING {
            let already_seen = found.iter().any(|(name, _)| *name == display_name);
            if !already_seen
                && nutrient
                    .nutrient_name
                    .to_lowercase()
                    .contains(&api_name.to_lowercase())
            {
                let value = (nutrient.value * 10.0).round() / 10.0;
                found.push((display_name, format!("{} {}", value, nutrient.unit_name)));
                break;
            }
        }
    }

    if found.is_empty() {
        return None;
    }

    let description = if food.description.is_empty() {
        food_name.to_string()
    } else {
        food.description.clone()
    };

    let mut result = format!("Nutritional information for {} (per 100g):\n", description);
    for name in PRIORITY_ORDER {
        if let Some((_, value)) = found.iter().find(|(n, _)| *n == name) {
            result.push_str(&format!("- {}: {}\n", name, value));
        }
    }
    result.push_str("\nValues may vary by brand and preparation method.");

    Some(result)
}

/// 常见食品的回退营养数据
fn fallback_nutrition(food_name: &str) -> String {
    let lower = food_name.to_lowercase();
    for (key, value) in COMMON_FOODS {
        if lower.contains(key) {
            return format!(
                "{}\n\nNutrition service unavailable - showing approximate values.",
                value
            );
        }
    }

    format!(
        "Unable to fetch nutrition data for '{}'. Try: apple, banana, chicken, rice, or egg.",
        food_name
    )
}
