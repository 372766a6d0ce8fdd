//! Upload-and-publish pipeline
//!
//! Both publishers check ownership against the record store before doing any
//! work and write the record back only once the asset is durably stored.

mod thumbnail;
mod video;

pub use thumbnail::{ThumbnailPublisher, ThumbnailTarget};
pub use video::{VideoPublisher, VideoPublisherConfig};

use std::sync::Arc;
use tubely_core::models::Video;
use tubely_core::AppError;
use tubely_db::VideoRepository;
use uuid::Uuid;

/// Load a record the requester owns.
async fn load_owned_video(
    videos: &Arc<dyn VideoRepository>,
    video_id: Uuid,
    requester_id: Uuid,
) -> Result<Video, AppError> {
    let video = videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if !video.is_owned_by(requester_id) {
        return Err(AppError::Unauthorized(
            "You are not the owner of this video".to_string(),
        ));
    }

    Ok(video)
}
