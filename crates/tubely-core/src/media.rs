//! Upload kinds and media type classification.
//!
//! Classification is an exact set-membership test on the parsed media type
//! (`type/subtype`); parameters such as `charset` are dropped before comparison.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::AppError;

const THUMBNAIL_MEDIA_TYPES: &[&str] = &["image/jpeg", "image/png"];
const VIDEO_MEDIA_TYPES: &[&str] = &["video/mp4"];

/// Default budget for thumbnail uploads (10 MiB).
pub const DEFAULT_MAX_THUMBNAIL_BYTES: usize = 10 << 20;
/// Default budget for video uploads (1 GiB).
pub const DEFAULT_MAX_VIDEO_BYTES: usize = 1 << 30;

/// What is being uploaded for a video record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Thumbnail,
    Video,
}

impl UploadKind {
    /// Multipart form field carrying the file.
    pub const fn form_field(&self) -> &'static str {
        match self {
            UploadKind::Thumbnail => "thumbnail",
            UploadKind::Video => "video",
        }
    }

    pub const fn accepted_media_types(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Thumbnail => THUMBNAIL_MEDIA_TYPES,
            UploadKind::Video => VIDEO_MEDIA_TYPES,
        }
    }

    pub const fn default_max_bytes(&self) -> usize {
        match self {
            UploadKind::Thumbnail => DEFAULT_MAX_THUMBNAIL_BYTES,
            UploadKind::Video => DEFAULT_MAX_VIDEO_BYTES,
        }
    }

    /// Classify a declared content type for this upload kind.
    pub fn classify(&self, content_type: &str) -> Result<AcceptedMediaType, MediaTypeRejection> {
        let parsed: mime::Mime = content_type
            .trim()
            .parse()
            .map_err(|_| MediaTypeRejection::InvalidMediaType(content_type.to_string()))?;
        let essence = parsed.essence_str().to_ascii_lowercase();

        self.accepted_media_types()
            .iter()
            .find(|accepted| **accepted == essence)
            .map(|accepted| AcceptedMediaType { essence: *accepted })
            .ok_or(MediaTypeRejection::Unsupported {
                kind: *self,
                media_type: essence,
            })
    }
}

impl Display for UploadKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadKind::Thumbnail => write!(f, "thumbnail"),
            UploadKind::Video => write!(f, "video"),
        }
    }
}

/// A media type that passed classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedMediaType {
    essence: &'static str,
}

impl AcceptedMediaType {
    pub fn as_str(&self) -> &'static str {
        self.essence
    }

    /// File extension used when naming stored objects.
    pub fn extension(&self) -> &'static str {
        match self.essence {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "video/mp4" => "mp4",
            other => other.rsplit('/').next().unwrap_or("bin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaTypeRejection {
    #[error("Invalid media type: {0:?}")]
    InvalidMediaType(String),

    #[error("Unsupported {kind} media type: {media_type}")]
    Unsupported { kind: UploadKind, media_type: String },
}

impl From<MediaTypeRejection> for AppError {
    fn from(rejection: MediaTypeRejection) -> Self {
        match rejection {
            MediaTypeRejection::InvalidMediaType(raw) => {
                AppError::InvalidInput(format!("Invalid media type: {:?}", raw))
            }
            MediaTypeRejection::Unsupported { kind, media_type } => {
                AppError::UnsupportedMediaType(format!(
                    "Unsupported file type {} for {}. Allowed types: {}",
                    media_type,
                    kind,
                    kind.accepted_media_types().join(", ")
                ))
            }
        }
    }
}
