//! Image upload for member photos and slides

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;

use super::{created, JsonResponse};
use crate::error::{ApiError, ApiResult};
use crate::middleware::TenantContext;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub size: usize,
    pub content_type: String,
}

/// POST /api/upload, multipart field `file`.
pub async fn upload(
    State(state): State<AppState>,
    ctx: TenantContext,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, JsonResponse<UploadResponse>)> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or("application/octet-stream").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
        file = Some((content_type, data.to_vec()));
    }

    let (content_type, data) = file.ok_or_else(|| ApiError::BadRequest("file required".to_string()))?;
    let stored = state.storage.save_image(ctx.tenant_id(), &content_type, &data).await?;

    Ok(created(UploadResponse {
        url: stored.url,
        size: stored.size,
        content_type: stored.content_type,
    }))
}
