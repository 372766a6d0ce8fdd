//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Path the local assets root is served under
pub const ASSETS_PATH: &str = "/assets";

/// Multipart part names
pub const THUMBNAIL_FIELD: &str = "thumbnail";
pub const VIDEO_FIELD: &str = "video";

/// The only accepted video container
pub const VIDEO_MP4: &str = "video/mp4";

/// Allowance for multipart boundaries and part headers on top of the video cap
pub const MULTIPART_OVERHEAD_BYTES: u64 = 1 << 20;

/// In-flight requests across the whole router; uploads hold a slot while ffmpeg runs.
pub const HTTP_CONCURRENCY_LIMIT: usize = 64;
