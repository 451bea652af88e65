use async_trait::async_trait;
use std::path::Path;
use tempfile::TempPath;

use crate::error::ProcessingResult;
use crate::probe::VideoDimensions;

/// External video tooling used by the upload pipeline.
#[async_trait]
pub trait VideoPreprocessor: Send + Sync {
    /// Remux `input` so its index sits at the front of the file.
    ///
    /// The returned path is removed when dropped.
    async fn normalize(&self, input: &Path) -> ProcessingResult<TempPath>;

    /// Frame size of the first video stream in `path`.
    async fn inspect(&self, path: &Path) -> ProcessingResult<VideoDimensions>;
}
