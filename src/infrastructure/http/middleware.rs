//! HTTP Middleware
//!
//! - HTTP 状态码错误日志中间件
//! - 可信来源校验（/api/auth 写操作）
//! - 会话校验（存储 / 语音 / 视频 / 导入接口）

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, ORIGIN},
        HeaderMap, Method,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::GetSession;

use super::error::ApiError;
use super::state::AppState;

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
/// 注意：业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

/// 可信来源列表
///
/// 比较前统一去掉结尾的 `/`，空字符串条目直接丢弃
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedOrigins {
    origins: Vec<String>,
}

impl TrustedOrigins {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for origin in origins {
            let normalized = normalize_origin(origin.as_ref());
            if !normalized.is_empty() && !list.iter().any(|o| o == normalized) {
                list.push(normalized.to_string());
            }
        }
        Self { origins: list }
    }

    pub fn is_trusted(&self, origin: &str) -> bool {
        let origin = normalize_origin(origin);
        self.origins.iter().any(|o| o == origin)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.origins
    }
}

fn normalize_origin(origin: &str) -> &str {
    origin.trim().trim_end_matches('/')
}

/// 可信来源校验中间件
///
/// 仅拦截带 Origin 头的写请求；没有 Origin 的请求（非浏览器客户端）直接放行
pub async fn trusted_origin_guard(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method();
    let is_safe = matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS);

    if !is_safe {
        if let Some(origin) = request.headers().get(ORIGIN) {
            let trusted = origin
                .to_str()
                .map(|o| state.trusted_origins.is_trusted(o))
                .unwrap_or(false);
            if !trusted {
                tracing::warn!(
                    method = %method,
                    uri = %request.uri(),
                    origin = ?origin,
                    "Rejected request from untrusted origin"
                );
                return ApiError::Forbidden("Invalid origin".to_string()).into_response();
            }
        }
    }

    next.run(request).await
}

const BEARER_PREFIX: &str = "Bearer ";

/// 从 Authorization 头中取出 Bearer token
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// 会话校验中间件
///
/// Bearer token 必须对应一个未过期的会话，否则返回 401；
/// 通过后把 SessionResponse 放进请求扩展
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!(uri = %request.uri(), "Request without bearer token");
        return ApiError::Unauthorized("Sign-in required".to_string()).into_response();
    };

    match state.get_session_handler.handle(GetSession { token }).await {
        Ok(Some(current)) => {
            tracing::debug!(
                user_id = %current.user.id,
                uri = %request.uri(),
                "Session verified"
            );
            request.extensions_mut().insert(current);
            next.run(request).await
        }
        Ok(None) => {
            tracing::debug!(uri = %request.uri(), "Request with unknown or expired session");
            ApiError::Unauthorized("Sign-in required".to_string()).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
