//! Tubely API Library
//!
//! HTTP surface of the upload backend: bearer authentication, multipart
//! ingestion, the thumbnail and video upload pipelines, and application setup.

pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::{AppState, MediaState};
