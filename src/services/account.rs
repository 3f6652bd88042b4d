//! 账号服务
//!
//! 注册、登录和用户信息查询。密码以 bcrypt 哈希存储，
//! 会话凭证为 JWT。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::user::User;
use crate::security::auth::JwtAuth;
use crate::security::password::{hash_password, verify_password};
use crate::security::validation::validate_signup;
use crate::storage::repository::UserRepository;

/// 登录/注册成功后的会话信息
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// JWT 会话凭证
    pub token: String,
    /// 用户信息
    pub user: User,
}

/// 账号服务 trait
#[async_trait]
pub trait AccountService: Send + Sync {
    /// 注册新账号并直接登录
    async fn signup(&self, username: &str, email: &str, password: &str) -> Result<AuthSession>;

    /// 登录
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession>;

    /// 按 ID 获取用户信息
    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;
}

/// 账号服务实现
pub struct AccountServiceImpl {
    users: UserRepository,
    authenticator: Arc<JwtAuth>,
}

impl AccountServiceImpl {
    /// 创建新的服务实例
    pub fn new(users: UserRepository, authenticator: Arc<JwtAuth>) -> Self {
        Self {
            users,
            authenticator,
        }
    }

    async fn session_for(&self, user: User) -> Result<AuthSession> {
        let token = self.authenticator.generate_token(user.id, &user.username)?;
        Ok(AuthSession { token, user })
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn signup(&self, username: &str, email: &str, password: &str) -> Result<AuthSession> {
        let username = username.trim();
        let email = email.trim();

        validate_signup(username, email, password)?;

        let password_hash = hash_password(password)?;

        // 统一小写存储，登录时大小写不敏感
        let username = username.to_lowercase();
        let email = email.to_lowercase();

        let user_id = self.users.insert(&username, &email, &password_hash).await?;
        info!(user_id, username = %username, "New account created");

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Internal("Created user vanished".to_string()))?;

        self.session_for(user).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let username = username.trim().to_lowercase();

        let user = self.users.find_by_username(&username).await?;

        // 用户不存在和密码错误返回同一条消息，避免枚举用户名
        let Some(user) = user else {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        self.users.touch_last_login(user.id).await?;
        info!(user_id = user.id, "User logged in");

        self.session_for(user).await
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.users.find_by_id(user_id).await
    }
}

/// 创建账号服务
pub fn create_account_service(
    users: UserRepository,
    authenticator: Arc<JwtAuth>,
) -> Box<dyn AccountService> {
    Box::new(AccountServiceImpl::new(users, authenticator))
}
