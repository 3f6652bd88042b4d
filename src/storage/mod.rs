//! 存储模块
//!
//! SQLite 连接池、启动时建表，以及用户/聊天记录两个仓储。

pub mod repository;
pub mod sqlite;

pub use repository::{MessageRepository, UserRepository};
pub use sqlite::{connect, connect_in_memory};
