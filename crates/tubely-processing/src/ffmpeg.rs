//! `ffprobe`/`ffmpeg` backed [`MediaToolkit`].

use crate::command::run_tool;
use crate::error::{ClassificationError, NormalizationError};
use crate::probe::{parse_probe_output, VideoDimensions};
use crate::toolkit::{normalized_output_path, MediaToolkit};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempPath;
use tokio::process::Command;

/// Media toolkit that shells out to the FFmpeg CLI tools.
#[derive(Debug, Clone)]
pub struct FfmpegToolkit {
    ffprobe_path: PathBuf,
    ffmpeg_path: PathBuf,
    timeout: Duration,
}

impl FfmpegToolkit {
    /// # Arguments
    /// * `ffprobe_path` / `ffmpeg_path` - binaries, resolved through `PATH` when bare names
    /// * `timeout` - upper bound on each tool invocation
    pub fn new(
        ffprobe_path: impl Into<PathBuf>,
        ffmpeg_path: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            ffmpeg_path: ffmpeg_path.into(),
            timeout,
        }
    }
}

#[async_trait]
impl MediaToolkit for FfmpegToolkit {
    #[tracing::instrument(
        skip(self),
        fields(process.executable.name = "ffprobe", file.path = %path.display())
    )]
    async fn probe(&self, path: &Path) -> Result<VideoDimensions, ClassificationError> {
        let start = Instant::now();
        let mut command = Command::new(&self.ffprobe_path);
        command
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path);

        let stdout = run_tool("ffprobe", command, self.timeout).await?;
        let dimensions = parse_probe_output(&stdout)?;

        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Video probe completed"
        );

        Ok(dimensions)
    }

    #[tracing::instrument(
        skip(self),
        fields(process.executable.name = "ffmpeg", file.path = %input.display())
    )]
    async fn remux_faststart(&self, input: &Path) -> Result<TempPath, NormalizationError> {
        let start = Instant::now();
        // Guard first so a failed or cancelled run cannot leave partial output.
        let output = TempPath::try_from_path(normalized_output_path(input))?;

        let mut command = Command::new(&self.ffmpeg_path);
        command
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(&*output);

        run_tool("ffmpeg", command, self.timeout).await?;

        if !tokio::fs::try_exists(&*output).await? {
            return Err(NormalizationError::MissingOutput(output.to_path_buf()));
        }

        tracing::debug!(
            output = %output.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Fast-start remux completed"
        );

        Ok(output)
    }
}
