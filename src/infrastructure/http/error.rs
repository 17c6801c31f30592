//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const UNAUTHORIZED: i32 = 401;
    pub const FORBIDDEN: i32 = 403;
    pub const NOT_FOUND: i32 = 404;
    pub const CONFLICT: i32 = 409;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Internal(String),
    Conflict(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn errno(&self) -> i32 {
        match self {
            ApiError::NotFound(_) => errno::NOT_FOUND,
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::Unauthorized(_) => errno::UNAUTHORIZED,
            ApiError::Forbidden(_) => errno::FORBIDDEN,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::Conflict(_) => errno::CONFLICT,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Internal(msg)
            | ApiError::Conflict(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.errno();
        let msg = self.message();

        match &self {
            ApiError::NotFound(_) => {
                tracing::warn!(errno = code, error = %msg, "Resource not found")
            }
            ApiError::BadRequest(_) => tracing::warn!(errno = code, error = %msg, "Bad request"),
            ApiError::Unauthorized(_) => {
                tracing::warn!(errno = code, error = %msg, "Unauthorized")
            }
            ApiError::Forbidden(_) => tracing::warn!(errno = code, error = %msg, "Forbidden"),
            ApiError::Conflict(_) => {
                tracing::warn!(errno = code, error = %msg, "Resource conflict")
            }
            ApiError::Internal(_) => {
                tracing::error!(errno = code, error = %msg, "Internal server error")
            }
            ApiError::ServiceUnavailable(_) => {
                tracing::error!(errno = code, error = %msg, "Service unavailable")
            }
        }

        // 业务错误统一返回 HTTP 200，通过 errno 区分
        (StatusCode::OK, Json(ErrorResponse::new(code, msg))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{} not found: {}", resource_type, id))
            }
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::Conflict(msg) => ApiError::Conflict(msg),
            ApplicationError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
            ApplicationError::ExternalServiceError(msg) => ApiError::ServiceUnavailable(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}
