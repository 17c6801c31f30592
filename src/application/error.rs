//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{HashError, RepositoryError, SignerError, SpeechError};
use crate::domain::account::AccountError;
use crate::domain::voice::VoiceError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 资源冲突
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 未认证 / 凭证错误
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建未认证错误
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(msg) => Self::Conflict(msg),
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<SignerError> for ApplicationError {
    fn from(err: SignerError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<SpeechError> for ApplicationError {
    fn from(err: SpeechError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}

impl From<HashError> for ApplicationError {
    fn from(err: HashError) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<AccountError> for ApplicationError {
    fn from(err: AccountError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<VoiceError> for ApplicationError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::NotFound(id) => Self::not_found("Voice", id),
            other => Self::ValidationError(other.to_string()),
        }
    }
}
