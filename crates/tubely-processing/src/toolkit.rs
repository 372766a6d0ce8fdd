//! Injectable media tool capability.

use crate::aspect::classify_aspect_ratio;
use crate::error::{ClassificationError, NormalizationError};
use crate::probe::VideoDimensions;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tubely_core::models::AspectRatio;

/// Probing and remuxing operations the video pipeline depends on.
#[async_trait]
pub trait MediaToolkit: Send + Sync {
    /// Dimensions of the primary video stream of the file at `path`.
    async fn probe(&self, path: &Path) -> Result<VideoDimensions, ClassificationError>;

    /// Losslessly remux `input` into [`normalized_output_path`] with the
    /// container metadata moved to the front.
    ///
    /// The returned path is deleted when dropped. On failure no output file is
    /// left behind.
    async fn remux_faststart(&self, input: &Path) -> Result<TempPath, NormalizationError>;

    /// Probe `path` and classify its aspect ratio.
    async fn inspect(&self, path: &Path) -> Result<AspectRatio, ClassificationError> {
        let dimensions = self.probe(path).await?;
        let class = classify_aspect_ratio(dimensions.width, dimensions.height)?;
        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            aspect_ratio = %class,
            "Media inspected"
        );
        Ok(class)
    }
}

/// `<input>.processing`
pub fn normalized_output_path(input: &Path) -> PathBuf {
    let mut path = OsString::from(input.as_os_str());
    path.push(".processing");
    PathBuf::from(path)
}
