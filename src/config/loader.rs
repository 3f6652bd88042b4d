use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. 内置开发默认值
    /// 2. ./config.toml
    /// 3. 环境变量（PANACEA_ 前缀，双下划线分隔层级）
    pub fn load() -> Result<AppConfig, figment::Error> {
        let figment = Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("PANACEA_").split("__").global());

        figment.extract()
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        let figment = Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("PANACEA_").split("__").global());

        figment.extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.database.path.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingDatabasePath);
        }

        let threshold = config.chatbot.fuzzy_match_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigValidationError::InvalidThreshold(threshold));
        }

        if config.chatbot.max_chat_history == 0 {
            return Err(ConfigValidationError::InvalidHistoryLimit);
        }

        if config.security.jwt_secret.len() < 32 {
            return Err(ConfigValidationError::WeakJwtSecret);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("数据库路径未配置")]
    MissingDatabasePath,

    #[error("相似度阈值无效（必须在 0.0 到 1.0 之间）: {0}")]
    InvalidThreshold(f64),

    #[error("聊天记录上限必须大于 0")]
    InvalidHistoryLimit,

    #[error("JWT 密钥过短，至少需要 32 个字符")]
    WeakJwtSecret,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// 检查配置文件是否存在
pub fn config_exists() -> bool {
    default_config_path().exists()
}
