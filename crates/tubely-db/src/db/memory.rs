use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tubely_core::models::{LocatorField, NewVideo, VideoRecord};
use tubely_core::AppError;
use uuid::Uuid;

use super::video::VideoStore;

/// Process-local record store used when no database is configured.
///
/// Every mutation runs under the single write guard.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<Uuid, VideoRecord>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed record, replacing any record with the same id.
    pub async fn insert(&self, record: VideoRecord) {
        self.videos.write().await.insert(record.id, record);
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoRepository {
    async fn create_video(&self, user_id: Uuid, draft: NewVideo) -> Result<VideoRecord, AppError> {
        let record = VideoRecord::new(user_id, draft);
        self.videos.write().await.insert(record.id, record.clone());
        tracing::info!(video_id = %record.id, user_id = %user_id, "Video record created");
        Ok(record)
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<VideoRecord>, AppError> {
        let mut videos: Vec<VideoRecord> = self
            .videos
            .read()
            .await
            .values()
            .filter(|video| video.is_owned_by(user_id))
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }

    async fn update_locator(
        &self,
        id: Uuid,
        field: LocatorField,
        locator: &str,
    ) -> Result<VideoRecord, AppError> {
        let mut videos = self.videos.write().await;
        let record = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;
        record.set_locator(field, locator);
        Ok(record.clone())
    }
}
