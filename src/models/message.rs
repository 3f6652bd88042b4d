use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 聊天消息实体
///
/// 每轮对话写入两行：用户输入一行、机器人回复一行。写入后不可变，
/// 仅由按量裁剪和可选的保留期清理删除。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatMessage {
    /// 消息唯一标识
    pub id: i64,

    /// 所属用户 ID
    pub user_id: i64,

    /// 消息内容
    pub message: String,

    /// 是否为用户消息（false 表示机器人回复）
    pub is_user_message: bool,

    /// 消息时间
    pub timestamp: DateTime<Utc>,
}

/// 用户聊天统计
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatStats {
    /// 总消息数（用户 + 机器人）
    pub total_messages: i64,

    /// 用户消息数
    pub user_messages: i64,

    /// 最早一条消息时间
    pub first_message: Option<DateTime<Utc>>,

    /// 最近一条消息时间
    pub last_message: Option<DateTime<Utc>>,
}
