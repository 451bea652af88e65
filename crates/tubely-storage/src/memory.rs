//! In-process storage backend.
//!
//! Objects live in a map guarded by a single `RwLock` and vanish when the
//! process exits. The API serves them back through its own thumbnail route,
//! so the locator is `{base_url}/{key}`.

use crate::traits::{validate_key, Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone)]
struct MemoryObject {
    data: Bytes,
    content_type: String,
}

pub struct MemoryStorage {
    objects: RwLock<HashMap<String, MemoryObject>>,
    base_url: String,
}

impl MemoryStorage {
    /// `base_url` is the route serving stored objects (e.g. "http://localhost:8091/api/thumbnails").
    pub fn new(base_url: String) -> Self {
        MemoryStorage {
            objects: RwLock::new(HashMap::new()),
            base_url,
        }
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;
        let size = data.len();

        self.objects.write().await.insert(
            storage_key.to_string(),
            MemoryObject {
                data,
                content_type: content_type.to_string(),
            },
        );

        tracing::info!(key = %storage_key, size_bytes = size, "Memory storage upload successful");

        Ok(self.public_url(storage_key))
    }

    async fn upload_file(
        &self,
        storage_key: &str,
        content_type: &str,
        path: &Path,
    ) -> StorageResult<String> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.upload(storage_key, content_type, Bytes::from(data)).await
    }

    async fn download(&self, storage_key: &str) -> StorageResult<StoredObject> {
        let objects = self.objects.read().await;
        let object = objects
            .get(storage_key)
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))?;

        Ok(StoredObject {
            data: object.data.clone(),
            content_type: Some(object.content_type.clone()),
        })
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        if self.objects.write().await.remove(storage_key).is_some() {
            tracing::info!(key = %storage_key, "Memory storage delete successful");
        }
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(storage_key))
    }

    async fn get_presigned_url(
        &self,
        storage_key: &str,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        Ok(self.public_url(storage_key))
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_memory_round_trip_keeps_content_type() {
        let storage = MemoryStorage::new("http://localhost:8091/api/thumbnails".to_string());

        let url = storage
            .upload("abc", "image/jpeg", Bytes::from_static(b"jpeg bytes"))
            .await
            .unwrap();
        assert_eq!(url, "http://localhost:8091/api/thumbnails/abc");

        let stored = storage.download("abc").await.unwrap();
        assert_eq!(&stored.data[..], b"jpeg bytes");
        assert_eq!(stored.content_type.as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_overwrite_replaces_previous_object() {
        let storage = MemoryStorage::new("http://x/api/thumbnails".to_string());
        storage
            .upload("abc", "image/png", Bytes::from_static(b"first"))
            .await
            .unwrap();
        storage
            .upload("abc", "image/jpeg", Bytes::from_static(b"second"))
            .await
            .unwrap();

        assert_eq!(storage.len().await, 1);
        let stored = storage.download("abc").await.unwrap();
        assert_eq!(&stored.data[..], b"second");
    }

    #[tokio::test]
    async fn test_concurrent_writers() {
        let storage = Arc::new(MemoryStorage::new("http://x".to_string()));
        let mut handles = Vec::new();
        for i in 0..32 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage
                    .upload(&format!("key-{}", i), "image/png", Bytes::from(vec![i as u8; 16]))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(storage.len().await, 32);
    }

    #[tokio::test]
    async fn test_delete_and_missing() {
        let storage = MemoryStorage::new("http://x".to_string());
        storage
            .upload("gone", "image/png", Bytes::from_static(b"x"))
            .await
            .unwrap();
        storage.delete("gone").await.unwrap();
        assert!(!storage.exists("gone").await.unwrap());
        assert!(matches!(
            storage.download("gone").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(storage.delete("gone").await.is_ok());
    }
}
