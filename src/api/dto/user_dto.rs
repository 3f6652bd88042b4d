//! 用户 DTO
//!
//! 定义用户概览（信息 + 聊天统计）的响应数据结构。

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::dto::auth_dto::UserResponse;
use crate::models::message::ChatStats;

/// 用户聊天统计响应
#[derive(Debug, Serialize)]
pub struct UserStatsResponse {
    /// 总消息数
    pub total_messages: i64,
    /// 用户消息数
    pub user_messages: i64,
    /// 最早一条消息时间
    pub first_message: Option<DateTime<Utc>>,
    /// 最近一条消息时间
    pub last_message: Option<DateTime<Utc>>,
}

impl From<ChatStats> for UserStatsResponse {
    fn from(stats: ChatStats) -> Self {
        Self {
            total_messages: stats.total_messages,
            user_messages: stats.user_messages,
            first_message: stats.first_message,
            last_message: stats.last_message,
        }
    }
}

/// 用户概览响应
#[derive(Debug, Serialize)]
pub struct UserOverviewResponse {
    /// 用户信息
    pub user: UserResponse,
    /// 聊天统计
    pub stats: UserStatsResponse,
}
