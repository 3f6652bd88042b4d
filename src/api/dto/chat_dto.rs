//! 聊天 DTO
//!
//! 定义聊天和历史记录相关的请求和响应数据结构。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::message::ChatMessage;

/// 聊天请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ChatRequest {
    /// 用户消息
    pub message: String,
}

/// 聊天响应
#[derive(Debug, Serialize)]
pub struct ChatReplyResponse {
    /// 机器人回复
    pub reply: String,
}

/// 历史查询参数
#[derive(Debug, Deserialize, Default)]
pub struct HistoryParams {
    /// 返回条数上限
    pub limit: Option<u32>,
}

/// 单条历史消息
#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    /// 消息内容
    pub message: String,
    /// 是否为用户消息
    pub is_user_message: bool,
    /// 消息时间
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            message: message.message,
            is_user_message: message.is_user_message,
            timestamp: message.timestamp,
        }
    }
}

/// 历史查询响应
#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    /// 消息列表（时间正序）
    pub history: Vec<ChatMessageResponse>,
    /// 本次返回条数
    pub total: usize,
}

/// 清空历史响应
#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    /// 删除行数
    pub deleted: u64,
    /// 消息
    pub message: String,
}
