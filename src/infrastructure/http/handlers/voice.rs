//! Voice HTTP Handlers - Perzona Library 只读目录

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{GetLibraryVoice, ListLibraryVoices};
use crate::infrastructure::http::dto::{ApiResponse, VoiceResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出预置音色（目录顺序）
pub async fn list_library_voices(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<VoiceResponse>>> {
    let voices = state.list_library_voices_handler.handle(ListLibraryVoices);
    Json(ApiResponse::success(
        voices.iter().map(VoiceResponse::from).collect(),
    ))
}

/// 获取单个预置音色
pub async fn get_library_voice(
    State(state): State<Arc<AppState>>,
    Path(voice_id): Path<String>,
) -> Result<Json<ApiResponse<VoiceResponse>>, ApiError> {
    let voice = state
        .get_library_voice_handler
        .handle(GetLibraryVoice { voice_id })?;
    Ok(Json(ApiResponse::success(VoiceResponse::from(&voice))))
}
