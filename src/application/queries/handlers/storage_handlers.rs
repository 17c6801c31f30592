//! Storage Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{PresignedUrl, UrlSignerPort};
use crate::application::queries::GetPresignedUrl;

/// GetPresignedUrl Handler
///
/// key 原样委托给签名器，不改写、不重试、不缓存
pub struct GetPresignedUrlHandler {
    signer: Arc<dyn UrlSignerPort>,
}

impl GetPresignedUrlHandler {
    pub fn new(signer: Arc<dyn UrlSignerPort>) -> Self {
        Self { signer }
    }

    pub fn handle(&self, query: GetPresignedUrl) -> Result<PresignedUrl, ApplicationError> {
        if query.key.trim().is_empty() {
            return Err(ApplicationError::validation("Object key cannot be empty"));
        }

        let presigned = self.signer.presign_get(&query.key)?;

        tracing::debug!(key = %query.key, expires_in = presigned.expires_in, "Presigned URL issued");

        Ok(presigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SignerError;
    use chrono::Utc;

    struct StubSigner;

    impl UrlSignerPort for StubSigner {
        fn presign_get(&self, key: &str) -> Result<PresignedUrl, SignerError> {
            if key == "broken" {
                return Err(SignerError::SigningFailed("backend down".to_string()));
            }
            Ok(PresignedUrl {
                url: format!("https://bucket.test/{}", key),
                expires_in: 3600,
                signed_at: Utc::now(),
            })
        }

        fn expires_in(&self) -> u64 {
            3600
        }
    }

    #[test]
    fn test_delegates_to_signer() {
        let handler = GetPresignedUrlHandler::new(Arc::new(StubSigner));
        let result = handler
            .handle(GetPresignedUrl {
                key: "tts/a.wav".to_string(),
            })
            .unwrap();
        assert_eq!(result.url, "https://bucket.test/tts/a.wav");
        assert_eq!(result.expires_in, 3600);
    }

    #[test]
    fn test_key_is_not_rewritten() {
        let handler = GetPresignedUrlHandler::new(Arc::new(StubSigner));
        let result = handler
            .handle(GetPresignedUrl {
                key: "/users/ada/custom_voice.wav".to_string(),
            })
            .unwrap();
        assert_eq!(
            result.url,
            "https://bucket.test//users/ada/custom_voice.wav"
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let handler = GetPresignedUrlHandler::new(Arc::new(StubSigner));
        let result = handler.handle(GetPresignedUrl { key: " ".to_string() });
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[test]
    fn test_signer_failure_propagates() {
        let handler = GetPresignedUrlHandler::new(Arc::new(StubSigner));
        let result = handler.handle(GetPresignedUrl {
            key: "broken".to_string(),
        });
        match result {
            Err(ApplicationError::ExternalServiceError(msg)) => {
                assert!(msg.contains("backend down"))
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
