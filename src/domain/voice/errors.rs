//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("音色不存在: {0}")]
    NotFound(String),

    #[error("音色 ID 重复: {0}")]
    DuplicateId(String),

    #[error("试听音频地址重复: {0}")]
    DuplicateAudioSource(String),

    #[error("无效的音色: {0}")]
    Invalid(String),

    #[error("音色目录已初始化")]
    AlreadyInstalled,
}
