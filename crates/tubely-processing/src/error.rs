//! Error types for staging, inspection and normalization.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure running an external media tool
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for {tool}: {source}")]
    Wait {
        tool: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{tool} timed out after {timeout:?}")]
    TimedOut {
        tool: &'static str,
        timeout: Duration,
    },

    #[error("{tool} failed ({status}): {stderr}")]
    Failed {
        tool: &'static str,
        status: String,
        stderr: String,
    },
}

/// The media inspector could not determine an aspect ratio
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("could not parse probe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("probe output lists no streams")]
    NoStreams,

    #[error("no stream reports width and height")]
    MissingDimensions,

    #[error("invalid video dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// The fast-start remux did not produce an output file
#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("remux produced no output at {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("remux output could not be checked: {0}")]
    Io(#[from] io::Error),
}

/// Copying a request body into a temporary file failed
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("failed to create staging file: {0}")]
    Create(#[source] io::Error),

    #[error("failed to write staging file: {0}")]
    Write(#[source] io::Error),

    #[error("failed to read upload body: {0}")]
    Body(#[source] io::Error),

    #[error("upload exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },
}
