//! 知识库模块
//!
//! 进程启动时从 JSON 文件一次性加载所有静态健康知识，之后只读共享。
//! 单个分类加载失败时降级为空集，不影响进程其他功能。

pub mod records;
pub mod store;

pub use records::{DiseaseRecord, IntentRecord, NutritionTip, QaRecord};
pub use store::KnowledgeStore;
