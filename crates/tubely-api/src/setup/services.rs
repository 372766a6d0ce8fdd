//! Wiring of repositories, storage and publishers into `AppState`

use crate::auth::JwtValidator;
use crate::services::publish::{ThumbnailPublisher, VideoPublisher, VideoPublisherConfig};
use crate::setup::storage::StorageSetup;
use crate::state::AppState;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_processing::MediaToolkit;

pub fn build_state(
    config: Config,
    videos: Arc<dyn VideoRepository>,
    storage: StorageSetup,
    toolkit: Arc<dyn MediaToolkit>,
) -> Arc<AppState> {
    let thumbnail_publisher = ThumbnailPublisher::new(
        videos.clone(),
        storage.thumbnails,
        config.max_thumbnail_size_bytes(),
    );

    let video_publisher = VideoPublisher::new(
        videos.clone(),
        storage.videos.clone(),
        toolkit,
        VideoPublisherConfig {
            temp_dir: config.upload_temp_dir().clone(),
            max_upload_bytes: config.max_video_size_bytes(),
        },
    );

    let jwt = Arc::new(JwtValidator::new(config.jwt_secret()));

    Arc::new(AppState {
        config,
        videos,
        video_storage: storage.videos,
        thumbnail_publisher,
        video_publisher,
        jwt,
    })
}
