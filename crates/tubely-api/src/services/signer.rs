//! Presigned access to stored videos
//!
//! With presigning enabled the record store holds object keys in `video_url`
//! and every record leaving the API carries a freshly signed GET URL instead.

use std::sync::Arc;
use std::time::Duration;
use tubely_core::models::VideoRecord;
use tubely_core::AppError;
use tubely_storage::{Storage, StorageBackend};

#[derive(Clone)]
pub struct UrlSigner {
    storage: Arc<dyn Storage>,
    expiry: Option<Duration>,
}

impl UrlSigner {
    /// Presigning only applies to the S3 backend; other backends ignore `expiry`.
    pub fn new(video_storage: Arc<dyn Storage>, expiry: Option<Duration>) -> Self {
        let expiry = expiry.filter(|_| video_storage.backend_type() == StorageBackend::S3);
        Self {
            storage: video_storage,
            expiry,
        }
    }

    pub fn is_presigning(&self) -> bool {
        self.expiry.is_some()
    }

    /// Locator recorded for a video stored under `key`.
    pub fn locator_for(&self, key: &str, public_url: String) -> String {
        if self.is_presigning() {
            key.to_string()
        } else {
            public_url
        }
    }

    /// Replace a stored video key with a presigned URL.
    pub async fn sign(&self, mut record: VideoRecord) -> Result<VideoRecord, AppError> {
        let Some(expiry) = self.expiry else {
            return Ok(record);
        };

        if let Some(key) = record.video_url.take() {
            let url = self.storage.get_presigned_url(&key, expiry).await?;
            tracing::debug!(
                video_id = %record.id,
                key = %key,
                expires_in_secs = expiry.as_secs(),
                "Issued presigned video URL"
            );
            record.video_url = Some(url);
        }

        Ok(record)
    }

    /// Sign a record whose update has already committed.
    ///
    /// A signing failure is logged and the stored locators are returned as is.
    pub async fn sign_or_keep(&self, record: VideoRecord) -> VideoRecord {
        match self.sign(record.clone()).await {
            Ok(signed) => signed,
            Err(e) => {
                tracing::warn!(
                    video_id = %record.id,
                    error = %e,
                    "Failed to presign video URL, returning stored locator"
                );
                record
            }
        }
    }

    pub async fn sign_all(&self, records: Vec<VideoRecord>) -> Result<Vec<VideoRecord>, AppError> {
        let mut signed = Vec::with_capacity(records.len());
        for record in records {
            signed.push(self.sign(record).await?);
        }
        Ok(signed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use tubely_core::models::{LocatorField, NewVideo};
    use tubely_storage::{MemoryStorage, StorageResult, StoredObject};
    use uuid::Uuid;

    /// Reports itself as S3 and signs by appending the expiry.
    struct SigningStorage;

    #[async_trait]
    impl Storage for SigningStorage {
        async fn upload(&self, key: &str, _ct: &str, _data: Bytes) -> StorageResult<String> {
            Ok(self.public_url(key))
        }

        async fn upload_file(
            &self,
            key: &str,
            _ct: &str,
            _path: &std::path::Path,
        ) -> StorageResult<String> {
            Ok(self.public_url(key))
        }

        async fn download(&self, key: &str) -> StorageResult<StoredObject> {
            Err(tubely_storage::StorageError::NotFound(key.to_string()))
        }

        async fn delete(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }

        async fn exists(&self, _key: &str) -> StorageResult<bool> {
            Ok(false)
        }

        async fn get_presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
            Ok(format!(
                "https://bucket.s3.amazonaws.com/{}?X-Amz-Expires={}",
                key,
                expires_in.as_secs()
            ))
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://bucket.s3.amazonaws.com/{}", key)
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::S3
        }
    }

    /// S3-typed backend whose signer always fails.
    struct BrokenSigner;

    #[async_trait]
    impl Storage for BrokenSigner {
        async fn upload(&self, key: &str, _ct: &str, _data: Bytes) -> StorageResult<String> {
            Ok(self.public_url(key))
        }

        async fn upload_file(
            &self,
            key: &str,
            _ct: &str,
            _path: &std::path::Path,
        ) -> StorageResult<String> {
            Ok(self.public_url(key))
        }

        async fn download(&self, key: &str) -> StorageResult<StoredObject> {
            Err(tubely_storage::StorageError::NotFound(key.to_string()))
        }

        async fn delete(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }

        async fn exists(&self, _key: &str) -> StorageResult<bool> {
            Ok(false)
        }

        async fn get_presigned_url(&self, _key: &str, _expires_in: Duration) -> StorageResult<String> {
            Err(tubely_storage::StorageError::BackendError(
                "credentials expired".to_string(),
            ))
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://bucket.s3.amazonaws.com/{}", key)
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::S3
        }
    }

    fn record_with_video(key: &str) -> VideoRecord {
        let mut record = VideoRecord::new(
            Uuid::new_v4(),
            NewVideo {
                title: "clip".to_string(),
                description: String::new(),
            },
        );
        record.set_locator(LocatorField::Video, key);
        record
    }

    #[tokio::test]
    async fn test_sign_replaces_key_with_presigned_url() {
        let signer = UrlSigner::new(Arc::new(SigningStorage), Some(Duration::from_secs(600)));
        assert!(signer.is_presigning());

        let signed = signer
            .sign(record_with_video("landscape/abc.mp4"))
            .await
            .unwrap();
        assert_eq!(
            signed.video_url.as_deref(),
            Some("https://bucket.s3.amazonaws.com/landscape/abc.mp4?X-Amz-Expires=600")
        );
    }

    #[tokio::test]
    async fn test_sign_leaves_records_without_video_alone() {
        let signer = UrlSigner::new(Arc::new(SigningStorage), Some(Duration::from_secs(600)));
        let record = VideoRecord::new(
            Uuid::new_v4(),
            NewVideo {
                title: "draft".to_string(),
                description: String::new(),
            },
        );
        let signed = signer.sign(record.clone()).await.unwrap();
        assert_eq!(signed, record);
    }

    #[tokio::test]
    async fn test_non_s3_backend_never_presigns() {
        let storage = Arc::new(MemoryStorage::new("http://localhost:8091/x".to_string()));
        let signer = UrlSigner::new(storage, Some(Duration::from_secs(600)));
        assert!(!signer.is_presigning());
        assert_eq!(
            signer.locator_for("k.mp4", "http://localhost:8091/x/k.mp4".to_string()),
            "http://localhost:8091/x/k.mp4"
        );

        let record = record_with_video("http://localhost:8091/x/k.mp4");
        let signed = signer.sign(record.clone()).await.unwrap();
        assert_eq!(signed.video_url, record.video_url);
    }

    #[tokio::test]
    async fn test_sign_or_keep_returns_stored_record_when_signing_fails() {
        let signer = UrlSigner::new(Arc::new(BrokenSigner), Some(Duration::from_secs(600)));
        let record = record_with_video("landscape/abc.mp4");

        assert!(signer.sign(record.clone()).await.is_err());

        let kept = signer.sign_or_keep(record.clone()).await;
        assert_eq!(kept, record);
    }

    #[tokio::test]
    async fn test_sign_or_keep_signs_when_possible() {
        let signer = UrlSigner::new(Arc::new(SigningStorage), Some(Duration::from_secs(60)));
        let kept = signer
            .sign_or_keep(record_with_video("portrait/k.mp4"))
            .await;
        assert_eq!(
            kept.video_url.as_deref(),
            Some("https://bucket.s3.amazonaws.com/portrait/k.mp4?X-Amz-Expires=60")
        );
    }

    #[test]
    fn test_presigning_records_keys() {
        let signer = UrlSigner::new(Arc::new(SigningStorage), Some(Duration::from_secs(60)));
        assert_eq!(
            signer.locator_for("portrait/k.mp4", "https://bucket/portrait/k.mp4".to_string()),
            "portrait/k.mp4"
        );
    }
}
