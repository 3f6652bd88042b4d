//! Auth Routes
//!
//! 定义注册和登录的公开路由（无需会话凭证）。

use crate::api::handlers::auth_handler::*;
use axum::{Router, routing::post};

use crate::api::app_state::AppState;

/// 创建认证路由器
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}
