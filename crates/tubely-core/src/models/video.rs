use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::media::UploadKind;

/// A video owned by a single user.
///
/// `id` and `user_id` never change after creation. The two locators are
/// written only by the upload pipeline once the bytes they reference have
/// been stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoRecord {
    pub fn new(user_id: Uuid, draft: NewVideo) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: draft.title,
            description: draft.description,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn locator(&self, field: LocatorField) -> Option<&str> {
        match field {
            LocatorField::Thumbnail => self.thumbnail_url.as_deref(),
            LocatorField::Video => self.video_url.as_deref(),
        }
    }

    pub fn set_locator(&mut self, field: LocatorField, locator: impl Into<String>) {
        let locator = Some(locator.into());
        match field {
            LocatorField::Thumbnail => self.thumbnail_url = locator,
            LocatorField::Video => self.video_url = locator,
        }
        self.updated_at = Utc::now();
    }
}

/// Request body for creating a video draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVideo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Which locator column of a video record an upload rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorField {
    Thumbnail,
    Video,
}

impl LocatorField {
    pub fn column(&self) -> &'static str {
        match self {
            LocatorField::Thumbnail => "thumbnail_url",
            LocatorField::Video => "video_url",
        }
    }
}

impl From<UploadKind> for LocatorField {
    fn from(kind: UploadKind) -> Self {
        match kind {
            UploadKind::Thumbnail => LocatorField::Thumbnail,
            UploadKind::Video => LocatorField::Video,
        }
    }
}
