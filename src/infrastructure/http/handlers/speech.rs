//! Speech HTTP Handlers - 语音生成 / 视频生成 / 文件导入

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{GeneratePortraitVideo, GenerateSpeech, ImportFile};
use crate::infrastructure::http::dto::{
    ApiResponse, GenerateSpeechRequest, GenerateVideoRequest, ImportFileRequest, StoredObjectDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成语音
pub async fn generate_speech(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateSpeechRequest>,
) -> Result<Json<ApiResponse<StoredObjectDto>>, ApiError> {
    let command = GenerateSpeech {
        text: req.text,
        voice_id: req.voice_id,
        voice_s3_key: req.voice_s3_key,
    };

    let stored = state.generate_speech_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(stored.into())))
}

/// 照片 + 音频生成口型视频
pub async fn generate_video(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateVideoRequest>,
) -> Result<Json<ApiResponse<StoredObjectDto>>, ApiError> {
    let command = GeneratePortraitVideo {
        transcript: req.transcript,
        photo_s3_key: req.photo_s3_key,
        audio_s3_key: req.audio_s3_key,
    };

    let stored = state.generate_video_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(stored.into())))
}

/// 从 URL 导入文件
pub async fn import_file(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImportFileRequest>,
) -> Result<Json<ApiResponse<StoredObjectDto>>, ApiError> {
    let stored = state
        .import_file_handler
        .handle(ImportFile { url: req.video_url })
        .await?;
    Ok(Json(ApiResponse::success(stored.into())))
}
