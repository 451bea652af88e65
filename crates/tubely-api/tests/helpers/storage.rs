//! Storage wrapper that counts writes.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tubely_storage::{Storage, StorageBackend, StorageResult, StoredObject};

pub struct CountingStorage {
    inner: Arc<dyn Storage>,
    writes: AtomicUsize,
}

impl CountingStorage {
    pub fn new(inner: Arc<dyn Storage>) -> Self {
        Self {
            inner,
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of `upload` and `upload_file` calls that reached the backend.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn upload(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.upload(storage_key, content_type, data).await
    }

    async fn upload_file(
        &self,
        storage_key: &str,
        content_type: &str,
        path: &Path,
    ) -> StorageResult<String> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.upload_file(storage_key, content_type, path).await
    }

    async fn download(&self, storage_key: &str) -> StorageResult<StoredObject> {
        self.inner.download(storage_key).await
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        self.inner.delete(storage_key).await
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        self.inner.exists(storage_key).await
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.inner.get_presigned_url(storage_key, expires_in).await
    }

    fn public_url(&self, storage_key: &str) -> String {
        self.inner.public_url(storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}
