use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::services::UploadService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

#[tracing::instrument(skip(state), fields(user_id = %user.user_id, video_id = %id))]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&id)?;
    let record = UploadService::new(&state)
        .owned_record(video_id, user.user_id)
        .await?;

    Ok(Json(state.signer.sign(record).await?))
}

#[tracing::instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, HttpAppError> {
    let records = state.videos.list_videos_for_user(user.user_id).await?;

    Ok(Json(state.signer.sign_all(records).await?))
}
