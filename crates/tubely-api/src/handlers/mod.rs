//! HTTP handlers

pub mod health;
pub mod thumbnail_get;
pub mod thumbnail_upload;
pub mod video_create;
pub mod video_get;
pub mod video_upload;

use tubely_core::AppError;
use uuid::Uuid;

/// Parse a `{id}` path segment, answering 400 in our error format when malformed.
pub(crate) fn parse_video_id(raw: &str) -> Result<Uuid, AppError> {
    Ok(Uuid::parse_str(raw)?)
}
