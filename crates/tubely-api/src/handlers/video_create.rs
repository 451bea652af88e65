use crate::auth::AuthUser;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tubely_core::models::NewVideo;
use tubely_core::AppError;

const MAX_TITLE_LEN: usize = 255;

#[tracing::instrument(skip(state, draft), fields(user_id = %user.user_id))]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(draft): ValidatedJson<NewVideo>,
) -> Result<impl IntoResponse, HttpAppError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title must not be empty".to_string()).into());
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(AppError::InvalidInput(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LEN
        ))
        .into());
    }

    let draft = NewVideo {
        title: title.to_string(),
        description: draft.description,
    };
    let record = state.videos.create_video(user.user_id, draft).await?;

    Ok(Json(record))
}
