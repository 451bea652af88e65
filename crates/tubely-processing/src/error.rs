//! Error types for video preprocessing.

use std::path::PathBuf;
use thiserror::Error;
use tubely_core::AppError;

/// Result type for preprocessing operations.
pub type ProcessingResult<T> = Result<T, ProcessingError>;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid tool path: {0}")]
    InvalidToolPath(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("Invalid video file: {0}")]
    InvalidVideo(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::FfmpegFailed {
                ref stderr,
                exit_code,
                ..
            } => {
                tracing::warn!(
                    exit_code = ?exit_code,
                    stderr = stderr.as_deref().unwrap_or(""),
                    "ffmpeg failed"
                );
                AppError::MediaProcessing(err.to_string())
            }
            other => AppError::MediaProcessing(other.to_string()),
        }
    }
}
