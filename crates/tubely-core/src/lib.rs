//! Tubely Core Library
//!
//! This crate provides core domain models, error types, configuration, and upload
//! classification that are shared across all Tubely components.

pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, TubelyConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use media::{AcceptedMediaType, MediaTypeRejection, UploadKind};
pub use storage_types::StorageBackend;
// Note: Storage, StorageError, StorageResult live in the tubely-storage crate
