//! Auth HTTP Handlers - 邮箱密码注册 / 登录 / 会话

use axum::{
    extract::State,
    http::{header::USER_AGENT, HeaderMap},
    Json,
};
use std::sync::Arc;

use crate::application::{
    AuthResponse, ClientInfo, GetSession, SignInEmail, SignOut, SignUpEmail,
};
use crate::infrastructure::http::dto::{
    format_time, ApiResponse, AuthTokenResponse, CurrentSessionResponse, Empty,
    SignInEmailRequest, SignUpEmailRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::middleware::bearer_token;
use crate::infrastructure::http::state::AppState;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// 请求来源：代理头中的第一个地址 + User-Agent
fn client_info(headers: &HeaderMap) -> ClientInfo {
    let ip_address = header_value(headers, FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .or_else(|| header_value(headers, REAL_IP))
        .map(str::to_string);

    ClientInfo {
        ip_address,
        user_agent: header_value(headers, USER_AGENT.as_str()).map(str::to_string),
    }
}

fn token_response(auth: AuthResponse) -> AuthTokenResponse {
    AuthTokenResponse {
        token: auth.token,
        expires_at: format_time(auth.expires_at),
        user: auth.user.into(),
    }
}

/// 邮箱注册
pub async fn sign_up_email(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SignUpEmailRequest>,
) -> Result<Json<ApiResponse<AuthTokenResponse>>, ApiError> {
    let command = SignUpEmail {
        name: req.name,
        email: req.email,
        password: req.password,
        client: client_info(&headers),
    };

    let auth = state.sign_up_email_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(token_response(auth))))
}

/// 邮箱登录
pub async fn sign_in_email(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SignInEmailRequest>,
) -> Result<Json<ApiResponse<AuthTokenResponse>>, ApiError> {
    let command = SignInEmail {
        email: req.email,
        password: req.password,
        client: client_info(&headers),
    };

    let auth = state.sign_in_email_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(token_response(auth))))
}

/// 当前会话，没有有效会话时 data 为 null
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Option<CurrentSessionResponse>>>, ApiError> {
    let Some(token) = bearer_token(&headers) else {
        return Ok(Json(ApiResponse::success(None)));
    };

    let current = state
        .get_session_handler
        .handle(GetSession { token })
        .await?
        .map(|found| CurrentSessionResponse {
            session: found.session.into(),
            user: found.user.into(),
        });

    Ok(Json(ApiResponse::success(current)))
}

/// 登出
pub async fn sign_out(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    state.sign_out_handler.handle(SignOut { token }).await?;
    Ok(Json(ApiResponse::ok()))
}
