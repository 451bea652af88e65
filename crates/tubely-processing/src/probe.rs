//! FFprobe output parsing.

use serde::Deserialize;

use crate::error::{ProcessingError, ProcessingResult};

/// Frame size of the first video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

/// FFprobe JSON output format (`-print_format json -show_streams`).
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Extract the dimensions of the first video stream from ffprobe's JSON output.
pub fn parse_dimensions(stdout: &[u8]) -> ProcessingResult<VideoDimensions> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)?;

    let stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref().map_or(true, |t| t == "video"))
        .ok_or_else(|| ProcessingError::InvalidVideo("No video stream found".to_string()))?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => {
            Ok(VideoDimensions { width, height })
        }
        _ => Err(ProcessingError::InvalidVideo(
            "Video stream has no frame size".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_video_stream() {
        let json = br#"{
            "streams": [
                {"codec_type": "audio", "codec_name": "aac"},
                {"codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080}
            ]
        }"#;
        let dims = parse_dimensions(json).unwrap();
        assert_eq!(dims, VideoDimensions { width: 1920, height: 1080 });
    }

    #[test]
    fn test_selected_stream_without_codec_type() {
        let json = br#"{"streams": [{"width": 1080, "height": 1920}]}"#;
        let dims = parse_dimensions(json).unwrap();
        assert_eq!(dims.height, 1920);
    }

    #[test]
    fn test_no_video_stream() {
        let json = br#"{"streams": [{"codec_type": "audio"}]}"#;
        assert!(matches!(
            parse_dimensions(json),
            Err(ProcessingError::InvalidVideo(_))
        ));

        assert!(matches!(
            parse_dimensions(b"{}"),
            Err(ProcessingError::InvalidVideo(_))
        ));
    }

    #[test]
    fn test_garbage_output() {
        assert!(matches!(
            parse_dimensions(b"not json"),
            Err(ProcessingError::JsonParse(_))
        ));
    }
}
