use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::services::UploadService;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// `POST /api/videos/{id}` with an MP4 in the `video` form field.
///
/// The file is remuxed for fast start and filed under its aspect ratio bucket.
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&id)?;

    let record = UploadService::new(&state)
        .upload_video(video_id, user.user_id, multipart)
        .await?;

    Ok(Json(record))
}
