//! ffmpeg/ffprobe backed preprocessor.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tempfile::TempPath;
use tokio::process::Command;

use crate::error::{ProcessingError, ProcessingResult};
use crate::probe::{parse_dimensions, VideoDimensions};
use crate::traits::VideoPreprocessor;

/// Reject tool paths that contain shell metacharacters or traversal.
fn validate_tool_path(path: &str) -> ProcessingResult<()> {
    if path.is_empty() {
        return Err(ProcessingError::InvalidToolPath("empty path".to_string()));
    }

    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(ProcessingError::InvalidToolPath(format!(
            "Path contains dangerous characters: {}",
            path
        )));
    }

    if path.contains("..") {
        return Err(ProcessingError::InvalidToolPath(format!(
            "Path contains directory traversal: {}",
            path
        )));
    }

    Ok(())
}

pub struct FfmpegPreprocessor {
    ffmpeg_path: String,
    ffprobe_path: String,
}

impl FfmpegPreprocessor {
    pub fn new(ffmpeg_path: String, ffprobe_path: String) -> ProcessingResult<Self> {
        validate_tool_path(&ffmpeg_path)?;
        validate_tool_path(&ffprobe_path)?;
        Ok(Self {
            ffmpeg_path,
            ffprobe_path,
        })
    }
}

#[async_trait]
impl VideoPreprocessor for FfmpegPreprocessor {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn normalize(&self, input: &Path) -> ProcessingResult<TempPath> {
        if !input.exists() {
            return Err(ProcessingError::FileNotFound(input.to_path_buf()));
        }

        let start = std::time::Instant::now();
        let dir = input.parent().unwrap_or_else(|| Path::new("."));
        let output_path = tempfile::Builder::new()
            .prefix("tubely-processed-")
            .suffix(".mp4")
            .tempfile_in(dir)?
            .into_temp_path();

        let output = Command::new(&self.ffmpeg_path)
            .args(["-y", "-v", "error", "-i"])
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(output_path.as_os_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(ProcessingError::FfmpegFailed {
                message: "fast start remux failed".to_string(),
                stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
                exit_code: output.status.code(),
            });
        }

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            output = %output_path.display(),
            "Video remuxed for fast start"
        );

        Ok(output_path)
    }

    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn inspect(&self, path: &Path) -> ProcessingResult<VideoDimensions> {
        if !path.exists() {
            return Err(ProcessingError::FileNotFound(path.to_path_buf()));
        }

        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_streams",
                "-select_streams",
                "v:0",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(ProcessingError::FfprobeFailed {
                message: "FFprobe failed".to_string(),
                stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
            });
        }

        let dimensions = parse_dimensions(&output.stdout)?;

        tracing::info!(
            width = dimensions.width,
            height = dimensions.height,
            "Video probe completed"
        );

        Ok(dimensions)
    }
}
