//! Tubely Storage Library
//!
//! Storage abstraction plus the two backends the upload pipeline publishes to:
//! S3 (via `object_store`) for normalized videos and the local public assets
//! root for thumbnails.
//!
//! # Storage key format
//!
//! Video keys are `<landscape|portrait|other>/<64 hex chars>.mp4` (see [`keys`]).
//! Thumbnail keys are `<videoID>.<subtype>`. Keys must not contain `..`, a leading
//! `/`, or backslashes.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::derive_video_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
