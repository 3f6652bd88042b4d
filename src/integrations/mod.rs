//! 外部服务集成模块
//!
//! 封装营养数据（USDA FoodData Central）、运动建议（ExerciseDB）
//! 和励志名言三个外部 REST API。所有失败都降级为内置的友好回复，
//! 永远不向用户暴露原始错误。

pub mod exercise;
pub mod nutrition;
pub mod wellness;

pub use exercise::ExerciseClient;
pub use nutrition::NutritionClient;
pub use wellness::WellnessProvider;

use std::time::Duration;

/// 按配置的超时构建 HTTP 客户端
pub(crate) fn build_http_client(timeout_seconds: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .expect("failed to build HTTP client")
}
