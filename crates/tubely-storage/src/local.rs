use crate::traits::{validate_key, Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Files live under `base_path` and are served by the static `/assets` route,
/// so the locator is `{base_url}/{key}`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "./assets")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8091/assets")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert storage key to filesystem path with security validation
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;

        let path = self.base_path.join(storage_key);

        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        if let Ok(canonical) = path.canonicalize() {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

/// Turn a failed write into `UploadFailed`, removing the partial file at `path`.
async fn discard_on_error<T>(
    path: &Path,
    storage_key: &str,
    result: std::io::Result<T>,
) -> StorageResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            let _ = fs::remove_file(path).await;
            tracing::error!(
                error = %e,
                path = %path.display(),
                key = %storage_key,
                "Local storage write failed, partial file removed"
            );
            Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )))
        }
    }
}

/// Content type for a stored file, from its extension.
fn content_type_for(path: &Path) -> Option<String> {
    let content_type = match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "mp4" => "video/mp4",
        _ => return None,
    };
    Some(content_type.to_string())
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let written = async {
            file.write_all(&data).await?;
            file.sync_all().await
        }
        .await;
        drop(file);
        discard_on_error(&path, storage_key, written).await?;

        let url = self.generate_url(storage_key);

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(url)
    }

    async fn upload_file(
        &self,
        storage_key: &str,
        _content_type: &str,
        source: &Path,
    ) -> StorageResult<String> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        self.ensure_parent_dir(&path).await?;

        let mut reader = fs::File::open(source).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to open {}: {}", source.display(), e))
        })?;
        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let copied = async {
            let n = tokio::io::copy(&mut reader, &mut file).await?;
            file.sync_all().await?;
            Ok::<_, std::io::Error>(n)
        }
        .await;
        drop(file);
        let bytes_copied = discard_on_error(&path, storage_key, copied).await?;

        let url = self.generate_url(storage_key);

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = bytes_copied,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage file upload successful"
        );

        Ok(url)
    }

    async fn download(&self, storage_key: &str) -> StorageResult<StoredObject> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(StoredObject {
            content_type: content_type_for(&path),
            data: Bytes::from(data),
        })
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        self.key_to_path(storage_key)?;
        Ok(self.generate_url(storage_key))
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.generate_url(storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    async fn storage_in(dir: &Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:8091/assets/".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_local_storage_upload_download() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let data = Bytes::from_static(b"\x89PNG fake image");
        let url = storage
            .upload("thumb.png", "image/png", data.clone())
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8091/assets/thumb.png");

        let stored = storage.download("thumb.png").await.unwrap();
        assert_eq!(stored.data, data);
        assert_eq!(stored.content_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_local_storage_upload_file_creates_prefix_dir() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let mut source = tempfile::NamedTempFile::new().unwrap();
        source.write_all(b"ftypmp42 video bytes").unwrap();

        let url = storage
            .upload_file("landscape/clip.mp4", "video/mp4", source.path())
            .await
            .unwrap();

        assert!(url.ends_with("/assets/landscape/clip.mp4"));
        assert!(dir.path().join("landscape/clip.mp4").exists());

        let stored = storage.download("landscape/clip.mp4").await.unwrap();
        assert_eq!(&stored.data[..], b"ftypmp42 video bytes");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let result = storage.download("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_local_storage_delete_nonexistent() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        assert!(storage.delete("missing.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_local_storage_exists() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        storage
            .upload("exists.jpg", "image/jpeg", Bytes::from_static(b"jpeg"))
            .await
            .unwrap();

        assert!(storage.exists("exists.jpg").await.unwrap());
        assert!(!storage.exists("nonexistent.jpg").await.unwrap());

        storage.delete("exists.jpg").await.unwrap();
        assert!(!storage.exists("exists.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_download_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path()).await;

        let result = storage.download("nope.png").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_write_removes_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.png");
        tokio::fs::write(&path, b"half a png").await.unwrap();

        let failed: std::io::Result<()> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let result = discard_on_error(&path, "partial.png", failed).await;

        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_successful_write_keeps_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("whole.png");
        tokio::fs::write(&path, b"png").await.unwrap();

        let size = discard_on_error(&path, "whole.png", Ok(3u64)).await.unwrap();

        assert_eq!(size, 3);
        assert!(path.exists());
    }
}
