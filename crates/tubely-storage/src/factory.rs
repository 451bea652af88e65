#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{MemoryStorage, Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use tubely_core::{Config, UploadKind};

/// Create the storage backend configured for an upload kind
pub async fn create_storage(config: &Config, kind: UploadKind) -> StorageResult<Arc<dyn Storage>> {
    let backend = match kind {
        UploadKind::Thumbnail => config.thumbnail_storage_backend(),
        UploadKind::Video => config.video_storage_backend(),
    };

    tracing::info!(kind = %kind, backend = %backend, "Initializing storage backend");

    match backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config
                .s3_region()
                .map(String::from)
                .or_else(|| config.aws_region().map(String::from))
                .ok_or_else(|| {
                    StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
                })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage = S3Storage::new(bucket, region, endpoint).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let storage =
                LocalStorage::new(config.assets_root(), config.assets_base_url()).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),

        StorageBackend::Memory if kind == UploadKind::Thumbnail => {
            let base_url = format!("{}/api/thumbnails", config.platform_url());
            Ok(Arc::new(MemoryStorage::new(base_url)))
        }

        StorageBackend::Memory => Err(StorageError::ConfigError(format!(
            "Memory storage backend is not supported for {} uploads",
            kind
        ))),
    }
}
