//! 仓储层
//!
//! 用户与聊天记录的 CRUD 操作。业务规则（验证、哈希、裁剪策略的
//! 触发时机）在服务层，这里只做数据访问。

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

use crate::error::{AppError, Result};
use crate::models::message::{ChatMessage, ChatStats};
use crate::models::user::User;

/// 用户仓储
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// 创建用户仓储
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 插入新用户，返回新行 ID
    ///
    /// 用户名或邮箱冲突映射为验证错误，不向上抛数据库细节。
    pub async fn insert(&self, username: &str, email: &str, password_hash: &str) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
                AppError::Validation("Username or email already exists".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// 按用户名查找
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, last_login
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// 按 ID 查找
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at, last_login
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// 更新最后登录时间
    pub async fn touch_last_login(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// 聊天记录仓储
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// 创建聊天记录仓储
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 写入一条消息，返回新行 ID
    pub async fn insert(&self, user_id: i64, message: &str, is_user_message: bool) -> Result<i64> {
        let done = sqlx::query(
            r#"
            INSERT INTO chat_history (user_id, message, is_user_message, timestamp)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(message)
        .bind(is_user_message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(done.last_insert_rowid())
    }

    /// 最近 limit 条消息，按时间正序返回
    pub async fn recent(&self, user_id: i64, limit: u32) -> Result<Vec<ChatMessage>> {
        let mut messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, user_id, message, is_user_message, timestamp
            FROM chat_history
            WHERE user_id = ?
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        messages.reverse();
        Ok(messages)
    }

    /// 用户消息总数
    pub async fn count_for_user(&self, user_id: i64) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM chat_history WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// 裁剪到上限：超出 max_messages 时删除最旧的多余行
    pub async fn prune_to_limit(&self, user_id: i64, max_messages: u32) -> Result<u64> {
        let count = self.count_for_user(user_id).await?;
        let surplus = count - max_messages as i64;
        if surplus <= 0 {
            return Ok(0);
        }

        let done = sqlx::query(
            r#"
            DELETE FROM chat_history
            WHERE id IN (
                SELECT id FROM chat_history
                WHERE user_id = ?
                ORDER BY timestamp ASC, id ASC
                LIMIT ?
            )
            "#,
        )
        .bind(user_id)
        .bind(surplus)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected())
    }

    /// 清空某用户的全部聊天记录，返回删除行数
    pub async fn clear(&self, user_id: i64) -> Result<u64> {
        let done = sqlx::query("DELETE FROM chat_history WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(done.rows_affected())
    }

    /// 删除早于保留期的消息（全部用户），返回删除行数
    pub async fn prune_older_than(&self, retention_days: u32) -> Result<u64> {
        let cutoff: DateTime<Utc> = Utc::now() - Duration::days(retention_days as i64);
        let done = sqlx::query("DELETE FROM chat_history WHERE timestamp < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(done.rows_affected())
    }

    /// 用户聊天统计
    pub async fn stats(&self, user_id: i64) -> Result<ChatStats> {
        let stats = sqlx::query_as::<_, ChatStats>(
            r#"
            SELECT
                COUNT(*) AS total_messages,
                COALESCE(SUM(CASE WHEN is_user_message = 1 THEN 1 ELSE 0 END), 0) AS user_messages,
                MIN(timestamp) AS first_message,
                MAX(timestamp) AS last_message
            FROM chat_history
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
