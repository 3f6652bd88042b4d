use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户实体
///
/// 注册时创建；除最后登录时间外不可变。密码只保存 bcrypt 哈希，
/// 序列化时跳过，避免泄漏到任何 API 响应。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// 用户唯一标识
    pub id: i64,

    /// 用户名（唯一，存储为小写）
    pub username: String,

    /// 邮箱（唯一，存储为小写）
    pub email: String,

    /// bcrypt 密码哈希
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// 注册时间
    pub created_at: DateTime<Utc>,

    /// 最后登录时间
    pub last_login: Option<DateTime<Utc>>,
}
