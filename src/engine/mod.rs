//! 对话引擎模块
//!
//! 核心匹配与应答逻辑：模糊匹配器、按优先级短路的应答解析器、
//! 以及在解析之前做关键词分流的调度器。

pub mod dispatcher;
pub mod matcher;
pub mod resolver;

pub use dispatcher::Dispatcher;
pub use matcher::{DEFAULT_FUZZY_THRESHOLD, Match, Matcher, normalize, similarity};
pub use resolver::{FALLBACK_MESSAGE, ResponseResolver};
