//! 核心数据模型模块
//!
//! 定义 Panacea 的持久化实体：User 和 ChatMessage。

pub mod message;
pub mod user;

pub use message::{ChatMessage, ChatStats};
pub use user::User;
