//! HTTP Speech Client - 调用后端语音生成 / 视频生成 / 文件导入服务
//!
//! 实现 SpeechServicePort trait，所有端点都在代理鉴权之后
//!
//! 外部 API:
//! POST {generate_url}
//! Request: {"text": "...", "voice_S3_key": "samples/voices/x.wav" | null}  (JSON)
//! Response: {"s3_key": "tts/<uuid>.wav"}
//!
//! POST {video_url}
//! Request: {"transcript": "...", "photo_s3_key": "...", "audio_s3_key": "..."}
//! Response: {"video_s3_key": "ptv/<uuid>.mp4"}
//!
//! POST {import_url}
//! Request: {"video_url": "https://..."}
//! Response: {"s3_key": "file/<uuid>.mp4"}
//!
//! 鉴权头: Modal-Key / Modal-Secret

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    FileImportRequest, SpeechError, SpeechRequest, SpeechServicePort, StoredObject, VideoRequest,
};

const PROXY_KEY_HEADER: &str = "Modal-Key";
const PROXY_SECRET_HEADER: &str = "Modal-Secret";

/// 语音生成请求体 (JSON)
#[derive(Debug, Serialize)]
struct GenerateSpeechBody<'a> {
    text: &'a str,
    #[serde(rename = "voice_S3_key")]
    voice_s3_key: Option<&'a str>,
}

/// 视频生成请求体 (JSON)
#[derive(Debug, Serialize)]
struct GenerateVideoBody<'a> {
    transcript: &'a str,
    photo_s3_key: &'a str,
    audio_s3_key: &'a str,
}

/// 视频生成响应体
#[derive(Debug, Deserialize)]
struct VideoObjectBody {
    video_s3_key: String,
}

/// 文件导入请求体 (JSON)
#[derive(Debug, Serialize)]
struct ImportFileBody<'a> {
    video_url: &'a str,
}

/// 语音生成 / 文件导入共用的响应体
#[derive(Debug, Deserialize)]
struct StoredObjectBody {
    s3_key: String,
}

/// HTTP 语音服务客户端配置
#[derive(Debug, Clone)]
pub struct HttpSpeechClientConfig {
    /// 语音生成端点
    pub generate_url: String,
    /// 视频生成端点
    pub video_url: String,
    /// 文件导入端点
    pub import_url: String,
    /// 代理鉴权 key
    pub proxy_key: Option<String>,
    /// 代理鉴权 secret
    pub proxy_secret: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpSpeechClientConfig {
    fn default() -> Self {
        Self {
            generate_url: "http://localhost:8000/generate_speech".to_string(),
            video_url: "http://localhost:8000/generate_video".to_string(),
            import_url: "http://localhost:8000/import_video".to_string(),
            proxy_key: None,
            proxy_secret: None,
            timeout_secs: 600,
        }
    }
}

impl HttpSpeechClientConfig {
    pub fn new(generate_url: impl Into<String>, import_url: impl Into<String>) -> Self {
        Self {
            generate_url: generate_url.into(),
            import_url: import_url.into(),
            ..Default::default()
        }
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_proxy_auth(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.proxy_key = Some(key.into());
        self.proxy_secret = Some(secret.into());
        self
    }
}

/// HTTP 语音服务客户端
pub struct HttpSpeechClient {
    client: Client,
    config: HttpSpeechClientConfig,
}

impl HttpSpeechClient {
    /// 创建新的客户端
    pub fn new(config: HttpSpeechClientConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeechError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 发送 JSON 请求并解析响应体
    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, SpeechError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.config.proxy_key {
            request = request.header(PROXY_KEY_HEADER, key);
        }
        if let Some(secret) = &self.config.proxy_secret {
            request = request.header(PROXY_SECRET_HEADER, secret);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SpeechError::Timeout
            } else if e.is_connect() {
                SpeechError::NetworkError(format!("Cannot connect to speech service: {}", e))
            } else {
                SpeechError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(e.to_string()))
    }

    /// 发送请求并解析 {"s3_key"}
    async fn post_for_object<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<StoredObject, SpeechError> {
        let body: StoredObjectBody = self.post_json(url, body).await?;
        stored_object(body.s3_key)
    }
}

fn stored_object(s3_key: String) -> Result<StoredObject, SpeechError> {
    if s3_key.is_empty() {
        return Err(SpeechError::InvalidResponse("empty s3_key".to_string()));
    }
    Ok(StoredObject { s3_key })
}

#[async_trait]
impl SpeechServicePort for HttpSpeechClient {
    async fn generate_speech(&self, request: SpeechRequest) -> Result<StoredObject, SpeechError> {
        let body = GenerateSpeechBody {
            text: &request.text,
            voice_s3_key: request.voice_s3_key.as_deref(),
        };

        tracing::debug!(
            url = %self.config.generate_url,
            text_len = request.text.len(),
            voice_s3_key = ?request.voice_s3_key,
            "Sending speech generation request"
        );

        let stored = self.post_for_object(&self.config.generate_url, &body).await?;

        tracing::info!(s3_key = %stored.s3_key, "Speech generation completed");

        Ok(stored)
    }

    async fn generate_video(&self, request: VideoRequest) -> Result<StoredObject, SpeechError> {
        let body = GenerateVideoBody {
            transcript: &request.transcript,
            photo_s3_key: &request.photo_s3_key,
            audio_s3_key: &request.audio_s3_key,
        };

        tracing::debug!(
            url = %self.config.video_url,
            photo_s3_key = %request.photo_s3_key,
            audio_s3_key = %request.audio_s3_key,
            "Sending portrait video request"
        );

        let response: VideoObjectBody = self.post_json(&self.config.video_url, &body).await?;
        let stored = stored_object(response.video_s3_key)?;

        tracing::info!(s3_key = %stored.s3_key, "Portrait video completed");

        Ok(stored)
    }

    async fn import_file(&self, request: FileImportRequest) -> Result<StoredObject, SpeechError> {
        let body = ImportFileBody {
            video_url: &request.url,
        };

        tracing::debug!(url = %self.config.import_url, source = %request.url, "Sending file import request");

        let stored = self.post_for_object(&self.config.import_url, &body).await?;

        tracing::info!(s3_key = %stored.s3_key, "File import completed");

        Ok(stored)
    }
}
