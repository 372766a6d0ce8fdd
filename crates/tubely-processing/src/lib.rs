//! Tubely Processing Library
//!
//! The media half of the upload pipeline:
//!
//! - **Staging**: [`StagedUpload`] copies a request body into a uniquely named
//!   temporary file that is removed when the value drops.
//! - **Inspection**: [`MediaToolkit::inspect`] probes a staged file and classifies
//!   its aspect ratio ([`classify_aspect_ratio`]).
//! - **Fast-start normalization**: [`MediaToolkit::remux_faststart`] remuxes a
//!   file into `<input>.processing` with its metadata atom moved to the front.
//!
//! [`FfmpegToolkit`] implements the toolkit with `ffprobe`/`ffmpeg` child
//! processes; tests substitute a stub.

pub mod aspect;
mod command;
pub mod error;
pub mod ffmpeg;
pub mod probe;
pub mod staging;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod toolkit;

pub use aspect::classify_aspect_ratio;
pub use error::{ClassificationError, NormalizationError, StagingError, ToolError};
pub use ffmpeg::FfmpegToolkit;
pub use probe::VideoDimensions;
pub use staging::StagedUpload;
pub use toolkit::MediaToolkit;
