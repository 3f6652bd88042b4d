use std::sync::Arc;

use sqlx::SqlitePool;

use crate::security::auth::JwtAuth;
use crate::security::rate_limit::RateLimiter;
use crate::services::account::AccountService;
use crate::services::chat::ChatService;

/// Application state containing all shared services and security components
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,
    /// Account service for signup/login
    pub account_service: Arc<dyn AccountService>,
    /// Chat service for message exchange and history
    pub chat_service: Arc<dyn ChatService>,
    /// Authenticator for session token validation
    pub authenticator: Arc<JwtAuth>,
    /// Rate limiter for request throttling
    pub rate_limiter: Arc<RateLimiter>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db_pool", &"SqlitePool")
            .field("account_service", &"Arc<dyn AccountService>")
            .field("chat_service", &"Arc<dyn ChatService>")
            .field("authenticator", &self.authenticator)
            .field("rate_limiter", &self.rate_limiter)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        db_pool: SqlitePool,
        account_service: Box<dyn AccountService>,
        chat_service: Box<dyn ChatService>,
        authenticator: Arc<JwtAuth>,
        rate_limiter: RateLimiter,
    ) -> Self {
        Self {
            db_pool,
            account_service: Arc::from(account_service),
            chat_service: Arc::from(chat_service),
            authenticator,
            rate_limiter: Arc::new(rate_limiter),
        }
    }
}
