use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 数据库文件路径
    pub path: PathBuf,
    /// 连接池最大大小
    pub max_connections: u32,
    /// 连接超时（秒）
    pub connection_timeout: u64,
}

/// 知识库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// 知识库数据目录
    pub data_dir: PathBuf,
}

/// 聊天引擎配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChatbotConfig {
    /// 意图匹配最低相似度阈值
    pub fuzzy_match_threshold: f64,
    /// 每个用户保留的聊天记录上限
    pub max_chat_history: u32,
    /// 历史查询的默认返回条数
    pub default_history_limit: u32,
    /// 聊天记录保留天数（None 表示不做定期清理）
    pub history_retention_days: Option<u32>,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
    /// 最大请求体大小（字节）
    pub max_request_size: usize,
}

/// 安全配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// JWT 签名密钥
    pub jwt_secret: String,
    /// JWT 签发者
    pub jwt_issuer: String,
    /// JWT 受众
    pub jwt_audience: String,
    /// JWT 有效期（秒）
    pub jwt_expiry_seconds: u64,
    /// Rate limiting 启用
    pub rate_limit_enabled: bool,
    /// 单客户端限流请求数/分钟
    pub requests_per_minute: u32,
    /// 单客户端限流请求数/小时
    pub requests_per_hour: u32,
}

/// 外部 API 配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExternalApiConfig {
    /// USDA FoodData Central API 密钥
    pub usda_api_key: Option<String>,
    /// RapidAPI 密钥（ExerciseDB）
    pub rapid_api_key: Option<String>,
    /// USDA 食品搜索接口地址
    pub usda_api_url: String,
    /// ExerciseDB 接口地址
    pub exercise_api_url: String,
    /// 励志名言接口地址
    pub quotes_api_url: String,
    /// 外部请求超时（秒）
    pub request_timeout: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件路径
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 知识库配置
    pub knowledge: KnowledgeConfig,
    /// 聊天引擎配置
    pub chatbot: ChatbotConfig,
    /// 服务器配置
    pub server: ServerConfig,
    /// 安全配置
    pub security: SecurityConfig,
    /// 外部 API 配置
    pub external: ExternalApiConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            database: DatabaseConfig {
                path: PathBuf::from("./data/panacea.db"),
                max_connections: 10,
                connection_timeout: 30,
            },
            knowledge: KnowledgeConfig {
                data_dir: PathBuf::from("./data"),
            },
            chatbot: ChatbotConfig {
                fuzzy_match_threshold: 0.6,
                max_chat_history: 100,
                default_history_limit: 50,
                history_retention_days: None,
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                request_timeout: 30,
                max_request_size: 1024 * 1024,
            },
            security: SecurityConfig {
                jwt_secret: "dev-secret-change-in-production-min-32-chars".into(),
                jwt_issuer: "panacea".into(),
                jwt_audience: "panacea-api".into(),
                jwt_expiry_seconds: 7 * 24 * 3600,
                rate_limit_enabled: false,
                requests_per_minute: 100,
                requests_per_hour: 5000,
            },
            external: ExternalApiConfig {
                usda_api_key: None,
                rapid_api_key: None,
                usda_api_url: "https://api.nal.usda.gov/fdc/v1/foods/search".into(),
                exercise_api_url: "https://exercisedb.p.rapidapi.com/exercises".into(),
                quotes_api_url: "https://type.fit/api/quotes".into(),
                request_timeout: 10,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "panacea".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.logging.log_dir = Some(PathBuf::from("./logs"));
        config.security.rate_limit_enabled = true;
        config
    }
}
