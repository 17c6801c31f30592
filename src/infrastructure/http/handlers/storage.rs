//! Storage HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GetPresignedUrl;
use crate::infrastructure::http::dto::{ApiResponse, PresignRequest, PresignResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成对象的预签名 GET 地址
pub async fn presign_object(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PresignRequest>,
) -> Result<Json<ApiResponse<PresignResponse>>, ApiError> {
    let presigned = state
        .get_presigned_url_handler
        .handle(GetPresignedUrl { key: req.key })?;
    Ok(Json(ApiResponse::success(PresignResponse::from(presigned))))
}
