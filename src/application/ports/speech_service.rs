//! Speech Service Port - 后端 GPU 生成服务抽象
//!
//! 语音生成、照片生成视频、文件导入都把结果写入对象存储，只返回对象 key

use async_trait::async_trait;
use thiserror::Error;

/// 语音服务错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 语音生成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    /// 要合成的文本
    pub text: String,
    /// 参考音频的对象 key；None 表示不克隆，使用默认声音
    pub voice_s3_key: Option<String>,
}

/// 照片 + 音频生成口播视频请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRequest {
    /// 口播文本
    pub transcript: String,
    /// 人像照片的对象 key
    pub photo_s3_key: String,
    /// 驱动音频的对象 key
    pub audio_s3_key: String,
}

/// 文件导入请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileImportRequest {
    /// 源文件 URL
    pub url: String,
}

/// 服务写入存储后的对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub s3_key: String,
}

/// Speech Service Port
#[async_trait]
pub trait SpeechServicePort: Send + Sync {
    /// 生成语音，返回生成音频的对象 key
    async fn generate_speech(&self, request: SpeechRequest) -> Result<StoredObject, SpeechError>;

    /// 生成口播视频，返回视频的对象 key
    async fn generate_video(&self, request: VideoRequest) -> Result<StoredObject, SpeechError>;

    /// 从 URL 导入文件到存储，返回对象 key
    async fn import_file(&self, request: FileImportRequest) -> Result<StoredObject, SpeechError>;
}
