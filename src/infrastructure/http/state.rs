//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use chrono::Duration;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    GeneratePortraitVideoHandler, GenerateSpeechHandler, ImportFileHandler, SessionIssuer, SignInEmailHandler, SignOutHandler,
    SignUpEmailHandler,
    // Query handlers
    GetLibraryVoiceHandler, GetPresignedUrlHandler, GetSessionHandler, ListLibraryVoicesHandler,
    // Ports
    PasswordHasherPort, SessionRepositoryPort, SpeechServicePort, UrlSignerPort,
    UserRepositoryPort,
};

use super::middleware::TrustedOrigins;

/// 认证相关设置
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub trusted_origins: TrustedOrigins,
    pub session_ttl: Duration,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            trusted_origins: TrustedOrigins::new(["http://localhost:3000"]),
            session_ttl: Duration::days(7),
        }
    }
}

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub user_repo: Arc<dyn UserRepositoryPort>,
    pub session_repo: Arc<dyn SessionRepositoryPort>,
    pub url_signer: Arc<dyn UrlSignerPort>,
    pub speech_service: Arc<dyn SpeechServicePort>,
    pub trusted_origins: TrustedOrigins,

    // ========== Command Handlers ==========
    pub sign_up_email_handler: SignUpEmailHandler,
    pub sign_in_email_handler: SignInEmailHandler,
    pub sign_out_handler: SignOutHandler,
    pub generate_speech_handler: GenerateSpeechHandler,
    pub generate_video_handler: GeneratePortraitVideoHandler,
    pub import_file_handler: ImportFileHandler,

    // ========== Query Handlers ==========
    pub list_library_voices_handler: ListLibraryVoicesHandler,
    pub get_library_voice_handler: GetLibraryVoiceHandler,
    pub get_presigned_url_handler: GetPresignedUrlHandler,
    pub get_session_handler: GetSessionHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        session_repo: Arc<dyn SessionRepositoryPort>,
        password_hasher: Arc<dyn PasswordHasherPort>,
        url_signer: Arc<dyn UrlSignerPort>,
        speech_service: Arc<dyn SpeechServicePort>,
        auth: AuthSettings,
    ) -> Self {
        let issuer = SessionIssuer::new(session_repo.clone(), auth.session_ttl);

        Self {
            // Ports
            user_repo: user_repo.clone(),
            session_repo: session_repo.clone(),
            url_signer: url_signer.clone(),
            speech_service: speech_service.clone(),
            trusted_origins: auth.trusted_origins,

            // Command handlers
            sign_up_email_handler: SignUpEmailHandler::new(
                user_repo.clone(),
                password_hasher.clone(),
                issuer.clone(),
            ),
            sign_in_email_handler: SignInEmailHandler::new(
                user_repo.clone(),
                password_hasher.clone(),
                issuer,
            ),
            sign_out_handler: SignOutHandler::new(session_repo.clone()),
            generate_speech_handler: GenerateSpeechHandler::new(speech_service.clone()),
            generate_video_handler: GeneratePortraitVideoHandler::new(speech_service.clone()),
            import_file_handler: ImportFileHandler::new(speech_service.clone()),

            // Query handlers
            list_library_voices_handler: ListLibraryVoicesHandler::new(),
            get_library_voice_handler: GetLibraryVoiceHandler::new(),
            get_presigned_url_handler: GetPresignedUrlHandler::new(url_signer.clone()),
            get_session_handler: GetSessionHandler::new(user_repo.clone(), session_repo.clone()),
        }
    }
}
