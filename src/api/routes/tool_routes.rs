//! Tool Routes
//!
//! 定义健康计算工具相关的 API 路由。

use crate::api::handlers::tool_handler::*;
use axum::{Router, routing::post};

use crate::api::app_state::AppState;

/// 创建健康工具路由器
pub fn create_tool_router() -> Router<AppState> {
    Router::new()
        .route("/tools/bmi", post(bmi))
        .route("/tools/water", post(water))
        .route("/tools/calories", post(calories))
}
