//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{PresignedUrl, SessionRecord, StoredObjectResponse, UserRecord};
use crate::domain::voice::Voice;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct VoiceResponse {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub tags: Vec<String>,
    pub accent: String,
    pub flag: String,
    pub audio_src: String,
    pub s3_key: String,
}

impl From<&Voice> for VoiceResponse {
    fn from(voice: &Voice) -> Self {
        Self {
            id: voice.id().to_string(),
            name: voice.name().to_string(),
            display_name: voice.display_name(),
            tags: voice.tags().to_vec(),
            accent: voice.accent().to_string(),
            flag: voice.flag().to_string(),
            audio_src: voice.audio_src().to_string(),
            s3_key: voice.s3_key().to_string(),
        }
    }
}

// ============================================================================
// Storage DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PresignRequest {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct PresignResponse {
    pub url: String,
    pub expires_in: u64,
    pub expires_at: String,
}

impl From<PresignedUrl> for PresignResponse {
    fn from(presigned: PresignedUrl) -> Self {
        Self {
            expires_at: format_time(presigned.expires_at()),
            url: presigned.url,
            expires_in: presigned.expires_in,
        }
    }
}

// ============================================================================
// Auth DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignUpEmailRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInEmailRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            email_verified: user.email_verified,
            created_at: format_time(user.created_at),
            updated_at: format_time(user.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthTokenResponse {
    pub token: String,
    pub expires_at: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expires_at: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: String,
}

impl From<SessionRecord> for SessionInfo {
    fn from(session: SessionRecord) -> Self {
        Self {
            id: session.id,
            user_id: session.user_id,
            expires_at: format_time(session.expires_at),
            ip_address: session.ip_address,
            user_agent: session.user_agent,
            created_at: format_time(session.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CurrentSessionResponse {
    pub session: SessionInfo,
    pub user: UserResponse,
}

// ============================================================================
// Speech DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateSpeechRequest {
    pub text: String,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub voice_s3_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateVideoRequest {
    pub transcript: String,
    pub photo_s3_key: String,
    pub audio_s3_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ImportFileRequest {
    pub video_url: String,
}

#[derive(Debug, Serialize)]
pub struct StoredObjectDto {
    pub s3_key: String,
}

impl From<StoredObjectResponse> for StoredObjectDto {
    fn from(stored: StoredObjectResponse) -> Self {
        Self {
            s3_key: stored.s3_key,
        }
    }
}

pub(crate) fn format_time(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}
