//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::voice::{Voice, VoiceCatalog, VoiceError};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 认证配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// S3 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 语音 / 视频生成与文件导入服务配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 预置音色目录（为空时使用内置目录）
    #[serde(default)]
    pub library: LibraryConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 认证配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// 可信来源（本地前端）
    #[serde(default = "default_trusted_origins")]
    pub trusted_origins: Vec<String>,

    /// 部署地址，追加到可信来源
    #[serde(default)]
    pub deployment_url: Option<String>,

    /// 会话有效期（秒）
    #[serde(default = "default_session_expire")]
    pub session_expire_secs: u64,
}

fn default_trusted_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_session_expire() -> u64 {
    7 * 24 * 3600 // 7 天
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            trusted_origins: default_trusted_origins(),
            deployment_url: None,
            session_expire_secs: default_session_expire(),
        }
    }
}

impl AuthConfig {
    /// 全部可信来源，空条目丢弃
    pub fn all_trusted_origins(&self) -> Vec<String> {
        self.trusted_origins
            .iter()
            .chain(self.deployment_url.iter())
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

/// S3 存储配置
#[derive(Clone, Deserialize)]
pub struct StorageConfig {
    /// Bucket 名称
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// 区域
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// 临时凭证
    #[serde(default)]
    pub session_token: Option<String>,

    /// 自定义端点（如 MinIO），默认 s3.{region}.amazonaws.com
    #[serde(default)]
    pub endpoint: Option<String>,

    /// 是否使用 path-style 地址
    #[serde(default)]
    pub force_path_style: bool,

    /// 预签名有效期（秒）
    #[serde(default = "default_presign_expires")]
    pub presign_expires_secs: u64,
}

fn default_bucket() -> String {
    "perzona-bucket".to_string()
}

fn default_region() -> String {
    "eu-west-3".to_string()
}

fn default_presign_expires() -> u64 {
    3600 // 1 小时
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            session_token: None,
            endpoint: None,
            force_path_style: false,
            presign_expires_secs: default_presign_expires(),
        }
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("force_path_style", &self.force_path_style)
            .field("presign_expires_secs", &self.presign_expires_secs)
            .finish()
    }
}

/// 语音 / 视频生成与文件导入服务配置
#[derive(Clone, Deserialize)]
pub struct SpeechConfig {
    /// 语音生成端点
    #[serde(default = "default_generate_url")]
    pub generate_url: String,

    /// 照片生成视频端点
    #[serde(default = "default_video_url")]
    pub video_url: String,

    /// 文件导入端点
    #[serde(default = "default_import_url")]
    pub import_url: String,

    /// 代理鉴权 key
    #[serde(default)]
    pub proxy_key: Option<String>,

    /// 代理鉴权 secret
    #[serde(default)]
    pub proxy_secret: Option<String>,

    /// 请求超时时间（秒），GPU 冷启动可能很慢
    #[serde(default = "default_speech_timeout")]
    pub timeout_secs: u64,
}

fn default_generate_url() -> String {
    "http://localhost:8000/generate_speech".to_string()
}

fn default_video_url() -> String {
    "http://localhost:8000/generate_video".to_string()
}

fn default_import_url() -> String {
    "http://localhost:8000/import_video".to_string()
}

fn default_speech_timeout() -> u64 {
    600
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            generate_url: default_generate_url(),
            video_url: default_video_url(),
            import_url: default_import_url(),
            proxy_key: None,
            proxy_secret: None,
            timeout_secs: default_speech_timeout(),
        }
    }
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("generate_url", &self.generate_url)
            .field("video_url", &self.video_url)
            .field("import_url", &self.import_url)
            .field("proxy_key", &self.proxy_key)
            .field("proxy_secret", &self.proxy_secret.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/perzona.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 预置音色目录配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub voices: Vec<Voice>,
}

impl LibraryConfig {
    /// 构建音色目录（逐条校验），未配置时返回 None
    pub fn to_catalog(&self) -> Result<Option<VoiceCatalog>, VoiceError> {
        if self.voices.is_empty() {
            return Ok(None);
        }
        VoiceCatalog::new(self.voices.clone()).map(Some)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
