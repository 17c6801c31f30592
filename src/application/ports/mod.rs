//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod password_hasher;
mod repositories;
mod speech_service;
mod url_signer;

pub use password_hasher::{HashError, PasswordHasherPort};
pub use repositories::{
    CredentialRecord, RepositoryError, SessionRecord, SessionRepositoryPort, UserRecord,
    UserRepositoryPort,
};
pub use speech_service::{
    FileImportRequest, SpeechError, SpeechRequest, SpeechServicePort, StoredObject, VideoRequest,
};
pub use url_signer::{PresignedUrl, SignerError, UrlSignerPort};
