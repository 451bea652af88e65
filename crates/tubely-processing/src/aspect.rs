//! Aspect ratio buckets used to organize stored videos.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Maximum distance between a measured ratio and a canonical one.
pub const ASPECT_TOLERANCE: f64 = 0.02;

const LANDSCAPE: f64 = 16.0 / 9.0;
const PORTRAIT: f64 = 9.0 / 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    /// 16:9
    Landscape,
    /// 9:16
    Portrait,
    Other,
}

impl AspectRatio {
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return AspectRatio::Other;
        }
        let ratio = width as f64 / height as f64;
        if (ratio - LANDSCAPE).abs() <= ASPECT_TOLERANCE {
            AspectRatio::Landscape
        } else if (ratio - PORTRAIT).abs() <= ASPECT_TOLERANCE {
            AspectRatio::Portrait
        } else {
            AspectRatio::Other
        }
    }

    /// Label reported for the bucket (`16:9`, `9:16` or `other`).
    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Other => "other",
        }
    }

    /// Path segment stored videos are grouped under.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "landscape",
            AspectRatio::Portrait => "portrait",
            AspectRatio::Other => "other",
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}
