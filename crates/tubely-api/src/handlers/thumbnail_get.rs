use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;
use tubely_core::AppError;
use tubely_storage::StorageBackend;

/// `GET /api/thumbnails/{id}`: serve a thumbnail held by the memory backend.
///
/// Other backends hand out locators that point elsewhere, so this route only
/// answers for the memory backend.
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&id)?;
    let storage = &state.media.thumbnail_storage;
    if storage.backend_type() != StorageBackend::Memory {
        return Err(AppError::NotFound(format!("Thumbnail for video {} not found", video_id)).into());
    }

    let object = storage.download(&video_id.to_string()).await?;
    let content_type = object
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok(([(header::CONTENT_TYPE, content_type)], object.data))
}
