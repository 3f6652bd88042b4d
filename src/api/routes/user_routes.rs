//! User Routes
//!
//! 定义用户信息相关的 API 路由。

use crate::api::handlers::user_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建用户路由器
pub fn create_user_router() -> Router<AppState> {
    Router::new().route("/users/me", get(me))
}
