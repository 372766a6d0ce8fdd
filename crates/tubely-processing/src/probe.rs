//! Parsing of `ffprobe -print_format json -show_streams` output.

use crate::error::ClassificationError;
use serde::Deserialize;

/// Pixel dimensions of a video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

/// Dimensions of the first stream that reports both width and height.
///
/// Audio or data streams listed ahead of the video stream carry no
/// dimensions and are skipped.
pub fn parse_probe_output(stdout: &[u8]) -> Result<VideoDimensions, ClassificationError> {
    let output: ProbeOutput = serde_json::from_slice(stdout)?;
    if output.streams.is_empty() {
        return Err(ClassificationError::NoStreams);
    }

    output
        .streams
        .iter()
        .find_map(|stream| match (stream.width, stream.height) {
            (Some(width), Some(height)) => Some(VideoDimensions { width, height }),
            _ => None,
        })
        .ok_or(ClassificationError::MissingDimensions)
}
