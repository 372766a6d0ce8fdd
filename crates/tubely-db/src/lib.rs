//! Database repositories for the video catalogue
//!
//! `VideoRepository` abstracts persistence so the publishers can run
//! against Postgres in production and an in-memory map in tests.

pub mod video;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use video::{PgVideoRepository, VideoRepository};
