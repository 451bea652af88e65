//! Tubely Storage Library
//!
//! Persistence backends for uploaded thumbnails and videos: local filesystem,
//! an in-process memory map, and S3-compatible object storage.
//!
//! # Storage key format
//!
//! - **Thumbnails**: `{token}.{ext}`
//! - **Videos**: `{aspect}/{token}.{ext}` where `aspect` is `landscape`, `portrait` or `other`
//!
//! `token` is 32 random bytes, URL-safe base64 without padding. Keys must not
//! contain `..` or a leading `/`. Key generation lives in the `keys` module.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
pub use tubely_core::StorageBackend;
