//! 认证 DTO
//!
//! 定义注册和登录相关的请求和响应数据结构。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// 注册请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SignupRequest {
    /// 用户名
    pub username: String,
    /// 邮箱
    pub email: String,
    /// 密码（明文，仅在传输中出现）
    pub password: String,
}

/// 登录请求
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
}

/// 用户信息响应（不含密码哈希）
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// 用户 ID
    pub id: i64,
    /// 用户名
    pub username: String,
    /// 邮箱
    pub email: String,
    /// 注册时间
    pub created_at: DateTime<Utc>,
    /// 最后登录时间
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

/// 注册/登录响应
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// JWT 会话凭证
    pub token: String,
    /// 用户信息
    pub user: UserResponse,
    /// 消息
    pub message: String,
}
