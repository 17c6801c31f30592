//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（UrlSigner、Repository、PasswordHasher、SpeechService）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Auth commands
    ClientInfo,
    SignInEmail,
    SignOut,
    SignUpEmail,
    // Speech commands
    GeneratePortraitVideo,
    GenerateSpeech,
    ImportFile,
    // Handlers
    handlers::{
        generate_session_token, AuthResponse, GeneratePortraitVideoHandler,
        GenerateSpeechHandler, ImportFileHandler,
        SessionIssuer, SignInEmailHandler, SignOutHandler, SignUpEmailHandler,
        StoredObjectResponse, DECOY_PASSWORD_HASH, INVALID_CREDENTIALS,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Password hasher
    HashError,
    PasswordHasherPort,
    // Repositories
    CredentialRecord,
    RepositoryError,
    SessionRecord,
    SessionRepositoryPort,
    UserRecord,
    UserRepositoryPort,
    // Speech service
    FileImportRequest,
    SpeechError,
    SpeechRequest,
    SpeechServicePort,
    StoredObject,
    VideoRequest,
    // URL signer
    PresignedUrl,
    SignerError,
    UrlSignerPort,
};

pub use queries::{
    // Auth queries
    GetSession,
    // Storage queries
    GetPresignedUrl,
    // Voice queries
    GetLibraryVoice,
    ListLibraryVoices,
    // Handlers
    handlers::{
        GetLibraryVoiceHandler, GetPresignedUrlHandler, GetSessionHandler,
        ListLibraryVoicesHandler, SessionResponse,
    },
};
