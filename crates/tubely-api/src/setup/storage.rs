//! Storage backend setup

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::{Config, UploadKind};
use tubely_storage::{create_storage, Storage};

/// Build the thumbnail and video backends selected by configuration.
pub async fn setup_storage(config: &Config) -> Result<(Arc<dyn Storage>, Arc<dyn Storage>)> {
    let thumbnails = create_storage(config, UploadKind::Thumbnail)
        .await
        .context("Failed to initialize thumbnail storage")?;
    let videos = create_storage(config, UploadKind::Video)
        .await
        .context("Failed to initialize video storage")?;

    tracing::info!(
        thumbnail_backend = %thumbnails.backend_type(),
        video_backend = %videos.backend_type(),
        "Storage initialized"
    );

    Ok((thumbnails, videos))
}
