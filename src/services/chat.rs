//! 聊天服务
//!
//! 一轮对话的完整流程：持久化用户消息 → 调度器生成回复 →
//! 持久化回复 → 按上限裁剪历史。历史查询、清空和统计也在这里。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::config::ChatbotConfig;
use crate::engine::dispatcher::Dispatcher;
use crate::error::Result;
use crate::models::message::{ChatMessage, ChatStats};
use crate::security::validation::validate_chat_message;
use crate::storage::repository::MessageRepository;

/// 空消息的回复（不落库）
const EMPTY_MESSAGE_REPLY: &str = "Please say something!";

/// 聊天服务 trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// 处理一轮对话，返回机器人回复
    async fn exchange(&self, user_id: i64, message: &str) -> Result<String>;

    /// 查询聊天历史（时间正序），None 使用配置的默认条数
    async fn history(&self, user_id: i64, limit: Option<u32>) -> Result<Vec<ChatMessage>>;

    /// 清空聊天历史，返回删除行数
    async fn clear_history(&self, user_id: i64) -> Result<u64>;

    /// 用户聊天统计
    async fn stats(&self, user_id: i64) -> Result<ChatStats>;

    /// 删除超过保留期的历史（未配置保留期时为空操作），返回删除行数
    async fn cleanup_expired(&self) -> Result<u64>;
}

/// 聊天服务实现
pub struct ChatServiceImpl {
    messages: MessageRepository,
    dispatcher: Arc<Dispatcher>,
    config: ChatbotConfig,
}

impl ChatServiceImpl {
    /// 创建新的服务实例
    pub fn new(
        messages: MessageRepository,
        dispatcher: Arc<Dispatcher>,
        config: ChatbotConfig,
    ) -> Self {
        Self {
            messages,
            dispatcher,
            config,
        }
    }
}

#[async_trait]
impl ChatService for ChatServiceImpl {
    async fn exchange(&self, user_id: i64, message: &str) -> Result<String> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Ok(EMPTY_MESSAGE_REPLY.to_string());
        }

        validate_chat_message(trimmed)?;

        self.messages.insert(user_id, trimmed, true).await?;

        let reply = self.dispatcher.dispatch(trimmed).await;

        self.messages.insert(user_id, &reply, false).await?;

        let removed = self
            .messages
            .prune_to_limit(user_id, self.config.max_chat_history)
            .await?;
        if removed > 0 {
            debug!(user_id, removed, "Pruned chat history over cap");
        }

        Ok(reply)
    }

    async fn history(&self, user_id: i64, limit: Option<u32>) -> Result<Vec<ChatMessage>> {
        let limit = limit
            .unwrap_or(self.config.default_history_limit)
            .min(self.config.max_chat_history);
        self.messages.recent(user_id, limit).await
    }

    async fn clear_history(&self, user_id: i64) -> Result<u64> {
        let removed = self.messages.clear(user_id).await?;
        info!(user_id, removed, "Chat history cleared");
        Ok(removed)
    }

    async fn stats(&self, user_id: i64) -> Result<ChatStats> {
        self.messages.stats(user_id).await
    }

    async fn cleanup_expired(&self) -> Result<u64> {
        let Some(retention_days) = self.config.history_retention_days else {
            return Ok(0);
        };

        let removed = self.messages.prune_older_than(retention_days).await?;
        if removed > 0 {
            info!(removed, retention_days, "Expired chat history removed");
        }
        Ok(removed)
    }
}

/// 创建聊天服务
pub fn create_chat_service(
    messages: MessageRepository,
    dispatcher: Arc<Dispatcher>,
    config: ChatbotConfig,
) -> Box<dyn ChatService> {
    Box::new(ChatServiceImpl::new(messages, dispatcher, config))
}
