//! Application state shared by all handlers.

use crate::auth::JwtValidator;
use crate::services::publish::{ThumbnailPublisher, VideoPublisher};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    /// Durable store videos are committed to
    pub video_storage: Arc<dyn Storage>,
    pub thumbnail_publisher: ThumbnailPublisher,
    pub video_publisher: VideoPublisher,
    pub jwt: Arc<JwtValidator>,
}
