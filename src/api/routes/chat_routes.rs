//! Chat Routes
//!
//! 定义聊天和历史记录相关的 API 路由。

use crate::api::handlers::chat_handler::*;
use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::api::app_state::AppState;

/// 创建聊天路由器
pub fn create_chat_router() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/history", get(get_history))
        .route("/chat/history", delete(clear_history))
}
