//! 服务模块

pub mod account;
pub mod chat;

pub use account::{AccountService, AuthSession, create_account_service};
pub use chat::{ChatService, create_chat_service};
