//! Tubely video preprocessing
//!
//! Uploaded videos are remuxed for fast start and probed for their frame size
//! before being stored. Both steps shell out to ffmpeg/ffprobe behind the
//! `VideoPreprocessor` trait so the upload pipeline can run against a fake.

pub mod aspect;
pub mod error;
pub mod ffmpeg;
pub mod probe;
pub mod traits;

pub use aspect::AspectRatio;
pub use error::{ProcessingError, ProcessingResult};
pub use ffmpeg::FfmpegPreprocessor;
pub use probe::VideoDimensions;
pub use traits::VideoPreprocessor;
