//! Test doubles for the media toolkit.

use crate::error::{ClassificationError, NormalizationError, ToolError};
use crate::probe::VideoDimensions;
use crate::toolkit::{normalized_output_path, MediaToolkit};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempPath;

/// In-process toolkit that never spawns a child process.
///
/// `probe` reports fixed dimensions; `remux_faststart` copies the input to
/// `<input>.processing`, or writes a partial file and fails when configured to.
#[derive(Debug, Clone)]
pub struct StubToolkit {
    dimensions: Option<VideoDimensions>,
    fail_remux: bool,
    remux_calls: Arc<AtomicUsize>,
}

impl StubToolkit {
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            dimensions: Some(VideoDimensions { width, height }),
            fail_remux: false,
            remux_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Probe reports no streams.
    pub fn failing_probe() -> Self {
        Self {
            dimensions: None,
            fail_remux: false,
            remux_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing_remux(mut self) -> Self {
        self.fail_remux = true;
        self
    }

    pub fn remux_calls(&self) -> usize {
        self.remux_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaToolkit for StubToolkit {
    async fn probe(&self, _path: &Path) -> Result<VideoDimensions, ClassificationError> {
        self.dimensions.ok_or(ClassificationError::NoStreams)
    }

    async fn remux_faststart(&self, input: &Path) -> Result<TempPath, NormalizationError> {
        self.remux_calls.fetch_add(1, Ordering::SeqCst);
        let output = TempPath::try_from_path(normalized_output_path(input))?;

        if self.fail_remux {
            tokio::fs::write(&*output, b"partial").await?;
            return Err(NormalizationError::Tool(ToolError::Failed {
                tool: "ffmpeg",
                status: "exit status: 1".to_string(),
                stderr: "moov atom not found".to_string(),
            }));
        }

        tokio::fs::copy(input, &*output).await?;
        Ok(output)
    }
}
