//! Video record updates after a successful store

use std::sync::Arc;
use tubely_core::models::{LocatorField, VideoRecord};
use tubely_core::AppError;
use tubely_db::VideoStore;
use tubely_storage::Storage;
use uuid::Uuid;

/// Writes a stored asset's locator back to its video record.
///
/// Runs last in the pipeline. If the record cannot be updated the stored
/// object is deleted in the background so no unreferenced asset is left behind.
#[derive(Clone)]
pub struct RecordUpdater {
    videos: Arc<dyn VideoStore>,
}

impl RecordUpdater {
    pub fn new(videos: Arc<dyn VideoStore>) -> Self {
        Self { videos }
    }

    pub async fn apply(
        &self,
        video_id: Uuid,
        field: LocatorField,
        locator: &str,
        storage: &Arc<dyn Storage>,
        storage_key: &str,
    ) -> Result<VideoRecord, AppError> {
        match self.videos.update_locator(video_id, field, locator).await {
            Ok(record) => {
                tracing::info!(
                    video_id = %video_id,
                    column = field.column(),
                    storage_key = %storage_key,
                    "Video record updated"
                );
                Ok(record)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    video_id = %video_id,
                    storage_key = %storage_key,
                    "Failed to update video record, removing stored object"
                );
                let storage = storage.clone();
                let storage_key = storage_key.to_string();
                tokio::spawn(async move {
                    if let Err(cleanup_err) = storage.delete(&storage_key).await {
                        tracing::warn!(
                            error = %cleanup_err,
                            storage_key = %storage_key,
                            "Failed to cleanup stored object after record update error"
                        );
                    }
                });
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::time::Duration;
    use tubely_core::models::NewVideo;
    use tubely_db::InMemoryVideoRepository;
    use tubely_storage::MemoryStorage;

    fn memory_storage() -> (Arc<MemoryStorage>, Arc<dyn Storage>) {
        let concrete = Arc::new(MemoryStorage::new("http://localhost:8091/api/thumbnails".into()));
        let storage: Arc<dyn Storage> = concrete.clone();
        (concrete, storage)
    }

    #[tokio::test]
    async fn test_apply_updates_record() {
        let videos = Arc::new(InMemoryVideoRepository::new());
        let record = videos
            .create_video(
                Uuid::new_v4(),
                NewVideo {
                    title: "t".into(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();
        let (_, storage) = memory_storage();

        let updater = RecordUpdater::new(videos.clone());
        let updated = updater
            .apply(record.id, LocatorField::Thumbnail, "http://x/a.png", &storage, "a.png")
            .await
            .unwrap();
        assert_eq!(updated.thumbnail_url.as_deref(), Some("http://x/a.png"));
    }

    #[tokio::test]
    async fn test_failed_update_removes_stored_object() {
        let videos = Arc::new(InMemoryVideoRepository::new());
        let (concrete, storage) = memory_storage();
        storage
            .upload("orphan", "image/png", Bytes::from_static(b"png"))
            .await
            .unwrap();

        let updater = RecordUpdater::new(videos);
        let err = updater
            .apply(Uuid::new_v4(), LocatorField::Thumbnail, "x", &storage, "orphan")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        for _ in 0..50 {
            if concrete.is_empty().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("orphaned object was not removed");
    }
}
