//! Thumbnail and video upload pipelines
//!
//! Both pipelines run the same gates in the same order: the caller must own
//! the record, and the form field must carry an accepted media type within its
//! budget. Nothing is written to storage until every gate has passed, and the
//! record is updated only after storage has returned a locator.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use tubely_core::models::{LocatorField, VideoRecord};
use tubely_core::{AppError, UploadKind};
use tubely_processing::AspectRatio;
use tubely_storage::{keys, StorageBackend};
use uuid::Uuid;

use crate::services::records::RecordUpdater;
use crate::state::AppState;
use crate::utils::upload::{read_buffered, spool_to_tempfile, UploadError};

pub struct UploadService {
    state: Arc<AppState>,
}

impl UploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Load a record and check that `user_id` owns it.
    pub async fn owned_record(&self, video_id: Uuid, user_id: Uuid) -> Result<VideoRecord, AppError> {
        let record = self
            .state
            .videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

        if !record.is_owned_by(user_id) {
            tracing::warn!(
                video_id = %video_id,
                user_id = %user_id,
                "Rejected access to a video owned by another user"
            );
            return Err(AppError::Forbidden(
                "You are not the owner of this video".to_string(),
            ));
        }

        Ok(record)
    }

    #[tracing::instrument(skip_all, fields(video_id = %video_id, user_id = %user_id))]
    pub async fn upload_thumbnail(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<VideoRecord, AppError> {
        self.owned_record(video_id, user_id).await?;
        let mut multipart = multipart.map_err(UploadError::from)?;

        let kind = UploadKind::Thumbnail;
        let media = &self.state.media;
        let upload = read_buffered(&mut multipart, kind, media.max_size_for(kind)).await?;

        let storage = media.storage_for(kind);
        // The memory backend is served back by record id.
        let storage_key = match storage.backend_type() {
            StorageBackend::Memory => video_id.to_string(),
            _ => keys::thumbnail_key(upload.media_type.extension()),
        };

        let size = upload.data.len();
        let locator = storage
            .upload(&storage_key, upload.media_type.as_str(), upload.data)
            .await?;

        tracing::info!(
            storage_key = %storage_key,
            size_bytes = size,
            content_type = upload.media_type.as_str(),
            "Thumbnail stored"
        );

        let record = RecordUpdater::new(self.state.videos.clone())
            .apply(
                video_id,
                LocatorField::Thumbnail,
                &locator,
                storage,
                &storage_key,
            )
            .await?;

        Ok(self.state.signer.sign_or_keep(record).await)
    }

    #[tracing::instrument(skip_all, fields(video_id = %video_id, user_id = %user_id))]
    pub async fn upload_video(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<VideoRecord, AppError> {
        self.owned_record(video_id, user_id).await?;
        let mut multipart = multipart.map_err(UploadError::from)?;

        let kind = UploadKind::Video;
        let media = &self.state.media;
        let spooled = spool_to_tempfile(&mut multipart, kind, media.max_size_for(kind)).await?;

        let processed = media.preprocessor.normalize(spooled.file.path()).await?;
        // The raw upload is no longer needed once the remux exists.
        drop(spooled.file);

        let dimensions = media.preprocessor.inspect(&processed).await?;
        let aspect = AspectRatio::from_dimensions(dimensions.width, dimensions.height);

        let storage_key = keys::video_key(aspect.key_prefix(), spooled.media_type.extension());
        let storage = media.storage_for(kind);
        let public_url = storage
            .upload_file(&storage_key, spooled.media_type.as_str(), &processed)
            .await?;

        tracing::info!(
            storage_key = %storage_key,
            size_bytes = spooled.size,
            width = dimensions.width,
            height = dimensions.height,
            aspect = %aspect,
            "Video stored"
        );

        let locator = self.state.signer.locator_for(&storage_key, public_url);
        let record = RecordUpdater::new(self.state.videos.clone())
            .apply(video_id, LocatorField::Video, &locator, storage, &storage_key)
            .await?;

        Ok(self.state.signer.sign_or_keep(record).await)
    }
}
