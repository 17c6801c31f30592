//! Speech Command Handlers

use std::sync::Arc;
use url::Url;

use crate::application::commands::{GeneratePortraitVideo, GenerateSpeech, ImportFile};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    FileImportRequest, SpeechRequest, SpeechServicePort, VideoRequest,
};
use crate::domain::voice::{library, VoiceCatalog};

/// 生成 / 导入后的对象位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObjectResponse {
    pub s3_key: String,
}

// ============================================================================
// GenerateSpeech
// ============================================================================

/// GenerateSpeech Handler
pub struct GenerateSpeechHandler {
    speech_service: Arc<dyn SpeechServicePort>,
    catalog: &'static VoiceCatalog,
}

impl GenerateSpeechHandler {
    pub fn new(speech_service: Arc<dyn SpeechServicePort>) -> Self {
        Self::with_catalog(speech_service, library())
    }

    pub fn with_catalog(
        speech_service: Arc<dyn SpeechServicePort>,
        catalog: &'static VoiceCatalog,
    ) -> Self {
        Self {
            speech_service,
            catalog,
        }
    }

    /// 解析参考音频 key: 预置音色 id 通过目录换成 s3_key
    fn resolve_voice_key(&self, command: &GenerateSpeech) -> Result<Option<String>, ApplicationError> {
        match (&command.voice_id, &command.voice_s3_key) {
            (Some(_), Some(_)) => Err(ApplicationError::validation(
                "voice_id and voice_s3_key are mutually exclusive",
            )),
            (Some(id), None) => self
                .catalog
                .get(id)
                .map(|voice| Some(voice.s3_key().to_string()))
                .ok_or_else(|| ApplicationError::not_found("Voice", id.as_str())),
            (None, Some(key)) if key.trim().is_empty() => {
                Err(ApplicationError::validation("voice_s3_key cannot be empty"))
            }
            (None, Some(key)) => Ok(Some(key.clone())),
            (None, None) => Ok(None),
        }
    }

    pub async fn handle(
        &self,
        command: GenerateSpeech,
    ) -> Result<StoredObjectResponse, ApplicationError> {
        if command.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text cannot be empty"));
        }

        let voice_s3_key = self.resolve_voice_key(&command)?;
        let cloned = voice_s3_key.is_some();

        let stored = self
            .speech_service
            .generate_speech(SpeechRequest {
                text: command.text,
                voice_s3_key,
            })
            .await?;

        tracing::info!(s3_key = %stored.s3_key, cloned, "Speech generated");

        Ok(StoredObjectResponse {
            s3_key: stored.s3_key,
        })
    }
}

// ============================================================================
// GeneratePortraitVideo
// ============================================================================

/// GeneratePortraitVideo Handler
pub struct GeneratePortraitVideoHandler {
    speech_service: Arc<dyn SpeechServicePort>,
}

impl GeneratePortraitVideoHandler {
    pub fn new(speech_service: Arc<dyn SpeechServicePort>) -> Self {
        Self { speech_service }
    }

    pub async fn handle(
        &self,
        command: GeneratePortraitVideo,
    ) -> Result<StoredObjectResponse, ApplicationError> {
        if command.transcript.trim().is_empty() {
            return Err(ApplicationError::validation("Transcript cannot be empty"));
        }
        let photo_s3_key = non_empty_key("photo_s3_key", command.photo_s3_key)?;
        let audio_s3_key = non_empty_key("audio_s3_key", command.audio_s3_key)?;

        let stored = self
            .speech_service
            .generate_video(VideoRequest {
                transcript: command.transcript,
                photo_s3_key,
                audio_s3_key,
            })
            .await?;

        tracing::info!(s3_key = %stored.s3_key, "Portrait video generated");

        Ok(StoredObjectResponse {
            s3_key: stored.s3_key,
        })
    }
}

/// 对象 key 去掉首尾空白和开头的 '/'
fn non_empty_key(field: &str, key: String) -> Result<String, ApplicationError> {
    let trimmed = key.trim().trim_start_matches('/');
    if trimmed.is_empty() {
        return Err(ApplicationError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// ImportFile
// ============================================================================

/// ImportFile Handler
pub struct ImportFileHandler {
    speech_service: Arc<dyn SpeechServicePort>,
}

impl ImportFileHandler {
    pub fn new(speech_service: Arc<dyn SpeechServicePort>) -> Self {
        Self { speech_service }
    }

    pub async fn handle(&self, command: ImportFile) -> Result<StoredObjectResponse, ApplicationError> {
        let url = Url::parse(&command.url)
            .map_err(|e| ApplicationError::validation(format!("Invalid url: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApplicationError::validation("Only http(s) urls can be imported"));
        }

        let stored = self
            .speech_service
            .import_file(FileImportRequest {
                url: url.to_string(),
            })
            .await?;

        tracing::info!(url = %url, s3_key = %stored.s3_key, "File imported");

        Ok(StoredObjectResponse {
            s3_key: stored.s3_key,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeSpeechService;
    use super::*;

    fn handler() -> (Arc<FakeSpeechService>, GenerateSpeechHandler) {
        let service = Arc::new(FakeSpeechService::default());
        let handler = GenerateSpeechHandler::new(service.clone());
        (service, handler)
    }

    #[tokio::test]
    async fn test_library_voice_resolves_to_s3_key() {
        let (service, handler) = handler();

        let result = handler
            .handle(GenerateSpeech {
                text: "Hello".to_string(),
                voice_id: Some("v2".to_string()),
                voice_s3_key: None,
            })
            .await
            .unwrap();

        assert_eq!(result.s3_key, "tts/generated.wav");
        let requests = service.speech_requests.lock().unwrap();
        assert_eq!(
            requests[0].voice_s3_key.as_deref(),
            Some("samples/voices/harris.wav")
        );
    }

    #[tokio::test]
    async fn test_no_voice_uses_default() {
        let (service, handler) = handler();

        handler
            .handle(GenerateSpeech {
                text: "Hello".to_string(),
                voice_id: None,
                voice_s3_key: None,
            })
            .await
            .unwrap();

        assert_eq!(service.speech_requests.lock().unwrap()[0].voice_s3_key, None);
    }

    #[tokio::test]
    async fn test_rejects_empty_text_and_ambiguous_voice() {
        let (service, handler) = handler();

        let empty = handler
            .handle(GenerateSpeech {
                text: "  ".to_string(),
                voice_id: None,
                voice_s3_key: None,
            })
            .await;
        assert!(matches!(empty, Err(ApplicationError::ValidationError(_))));

        let both = handler
            .handle(GenerateSpeech {
                text: "Hi".to_string(),
                voice_id: Some("v1".to_string()),
                voice_s3_key: Some("custom/me.wav".to_string()),
            })
            .await;
        assert!(matches!(both, Err(ApplicationError::ValidationError(_))));
        assert!(service.speech_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_voice_not_found() {
        let (_, handler) = handler();

        let result = handler
            .handle(GenerateSpeech {
                text: "Hi".to_string(),
                voice_id: Some("v404".to_string()),
                voice_s3_key: None,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_import_rejects_non_http() {
        let service = Arc::new(FakeSpeechService::default());
        let handler = ImportFileHandler::new(service.clone());

        let result = handler
            .handle(ImportFile {
                url: "file:///etc/passwd".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));

        let ok = handler
            .handle(ImportFile {
                url: "https://example.com/clip.mp4".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(ok.s3_key, "file/imported.mp4");
    }

    #[tokio::test]
    async fn test_portrait_video_normalizes_keys() {
        let service = Arc::new(FakeSpeechService::default());
        let handler = GeneratePortraitVideoHandler::new(service.clone());

        let result = handler
            .handle(GeneratePortraitVideo {
                transcript: "Hi, I am Ada".to_string(),
                photo_s3_key: "/samples/photos/0008.jpg".to_string(),
                audio_s3_key: "tts/generated.wav".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(result.s3_key, "ptv/generated.mp4");

        let requests = service.video_requests.lock().unwrap();
        assert_eq!(requests[0].photo_s3_key, "samples/photos/0008.jpg");
        assert_eq!(requests[0].audio_s3_key, "tts/generated.wav");
    }

    #[tokio::test]
    async fn test_portrait_video_requires_inputs() {
        let service = Arc::new(FakeSpeechService::default());
        let handler = GeneratePortraitVideoHandler::new(service.clone());

        let missing_audio = handler
            .handle(GeneratePortraitVideo {
                transcript: "Hi".to_string(),
                photo_s3_key: "samples/photos/0008.jpg".to_string(),
                audio_s3_key: " ".to_string(),
            })
            .await;
        assert!(matches!(missing_audio, Err(ApplicationError::ValidationError(_))));

        let missing_text = handler
            .handle(GeneratePortraitVideo {
                transcript: String::new(),
                photo_s3_key: "p.jpg".to_string(),
                audio_s3_key: "a.wav".to_string(),
            })
            .await;
        assert!(matches!(missing_text, Err(ApplicationError::ValidationError(_))));
        assert!(service.video_requests.lock().unwrap().is_empty());
    }
}
