//! Stand-in for ffmpeg/ffprobe.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempPath;
use tubely_processing::{ProcessingError, ProcessingResult, VideoDimensions, VideoPreprocessor};

/// Copies the input as the "remuxed" output and reports fixed dimensions.
///
/// Remembers every path it was handed so tests can check temporary files are gone.
pub struct FakePreprocessor {
    dimensions: VideoDimensions,
    seen: Mutex<Vec<PathBuf>>,
}

impl FakePreprocessor {
    pub fn new(dimensions: VideoDimensions) -> Self {
        Self {
            dimensions,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen_paths(&self) -> Vec<PathBuf> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoPreprocessor for FakePreprocessor {
    async fn normalize(&self, input: &Path) -> ProcessingResult<TempPath> {
        if !input.exists() {
            return Err(ProcessingError::FileNotFound(input.to_path_buf()));
        }
        let output = tempfile::Builder::new()
            .prefix("tubely-processed-")
            .suffix(".mp4")
            .tempfile()?
            .into_temp_path();
        tokio::fs::copy(input, &output).await?;

        let mut seen = self.seen.lock().unwrap();
        seen.push(input.to_path_buf());
        seen.push(output.to_path_buf());
        Ok(output)
    }

    async fn inspect(&self, path: &Path) -> ProcessingResult<VideoDimensions> {
        if !path.exists() {
            return Err(ProcessingError::FileNotFound(path.to_path_buf()));
        }
        Ok(self.dimensions)
    }
}
