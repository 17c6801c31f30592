//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "PERZONA";

/// 预签名有效期上限（SigV4 限制 7 天）
const MAX_PRESIGN_EXPIRES_SECS: u64 = 7 * 24 * 3600;

/// 加载应用配置
///
/// # 环境变量示例
/// - `PERZONA_SERVER__PORT=8080`
/// - `PERZONA_AUTH__DEPLOYMENT_URL=https://perzona.app`
/// - `PERZONA_STORAGE__ACCESS_KEY_ID=AKIA...`
/// - `PERZONA_SPEECH__PROXY_SECRET=ws-...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3001)?
        .set_default("auth.trusted_origins", vec!["http://localhost:3000"])?
        .set_default("auth.session_expire_secs", 7 * 24 * 3600)?
        .set_default("storage.bucket", "perzona-bucket")?
        .set_default("storage.region", "eu-west-3")?
        .set_default("storage.presign_expires_secs", 3600)?
        .set_default("speech.timeout_secs", 600)?
        .set_default("database.path", "data/perzona.db")?
        .set_default("database.max_connections", 5)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 层级分隔符: __ (双下划线)，例如 PERZONA_STORAGE__BUCKET=my-bucket
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.auth.session_expire_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Session expiry cannot be 0".to_string(),
        ));
    }

    if config.auth.all_trusted_origins().is_empty() {
        return Err(ConfigError::ValidationError(
            "At least one trusted origin is required".to_string(),
        ));
    }

    let expires = config.storage.presign_expires_secs;
    if !(1..=MAX_PRESIGN_EXPIRES_SECS).contains(&expires) {
        return Err(ConfigError::ValidationError(format!(
            "Presign expiry must be within 1..={} seconds, got {}",
            MAX_PRESIGN_EXPIRES_SECS, expires
        )));
    }

    if config.storage.bucket.is_empty() || config.storage.region.is_empty() {
        return Err(ConfigError::ValidationError(
            "Storage bucket and region cannot be empty".to_string(),
        ));
    }

    let speech = &config.speech;
    if speech.generate_url.is_empty() || speech.video_url.is_empty() || speech.import_url.is_empty()
    {
        return Err(ConfigError::ValidationError(
            "Speech service urls cannot be empty".to_string(),
        ));
    }

    config
        .library
        .to_catalog()
        .map_err(|e| ConfigError::ValidationError(format!("Invalid voice library: {}", e)))?;

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Trusted Origins: {:?}", config.auth.all_trusted_origins());
    tracing::info!("Session Expire: {}s", config.auth.session_expire_secs);
    tracing::info!(
        "Storage: s3://{} ({})",
        config.storage.bucket,
        config.storage.region
    );
    tracing::info!("Presign Expire: {}s", config.storage.presign_expires_secs);
    tracing::info!("Speech Generate URL: {}", config.speech.generate_url);
    tracing::info!("Video Generate URL: {}", config.speech.video_url);
    tracing::info!("File Import URL: {}", config.speech.import_url);
    tracing::info!("Database: {}", config.database.path);
    if config.library.voices.is_empty() {
        tracing::info!("Voice Library: builtin");
    } else {
        tracing::info!("Voice Library: {} configured voices", config.library.voices.len());
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
