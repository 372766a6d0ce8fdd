use super::load_owned_video;
use crate::error::from_storage_error;
use crate::utils::upload::mime_subtype;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use std::sync::Arc;
use tubely_core::models::Video;
use tubely_core::{AppError, ThumbnailMode};
use tubely_db::VideoRepository;
use tubely_storage::Storage;
use uuid::Uuid;

/// Where thumbnails are published, fixed at startup.
#[derive(Clone)]
pub enum ThumbnailTarget {
    /// `data:<content-type>;base64,<payload>` stored on the record
    Inline,
    /// `<videoID>.<subtype>` written under the public assets root
    Assets(Arc<dyn Storage>),
}

impl ThumbnailTarget {
    pub fn mode(&self) -> ThumbnailMode {
        match self {
            ThumbnailTarget::Inline => ThumbnailMode::Inline,
            ThumbnailTarget::Assets(_) => ThumbnailMode::Local,
        }
    }
}

#[derive(Clone)]
pub struct ThumbnailPublisher {
    videos: Arc<dyn VideoRepository>,
    target: ThumbnailTarget,
    max_bytes: u64,
}

impl ThumbnailPublisher {
    pub fn new(videos: Arc<dyn VideoRepository>, target: ThumbnailTarget, max_bytes: u64) -> Self {
        Self {
            videos,
            target,
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Publish `data` as the thumbnail of `video_id` and return the updated record.
    #[tracing::instrument(
        skip(self, data),
        fields(video_id = %video_id, user_id = %requester_id, size_bytes = data.len(), mode = %self.target.mode())
    )]
    pub async fn publish(
        &self,
        video_id: Uuid,
        requester_id: Uuid,
        content_type: Option<&str>,
        data: Bytes,
    ) -> Result<Video, AppError> {
        let mut video = load_owned_video(&self.videos, video_id, requester_id).await?;

        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .ok_or_else(|| {
                AppError::BadRequest("Missing Content-Type for thumbnail".to_string())
            })?;

        if data.len() as u64 > self.max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Thumbnail exceeds max {} bytes",
                self.max_bytes
            )));
        }

        let url = match &self.target {
            ThumbnailTarget::Inline => {
                format!("data:{};base64,{}", content_type, STANDARD.encode(&data))
            }
            ThumbnailTarget::Assets(storage) => {
                let subtype = mime_subtype(content_type).ok_or_else(|| {
                    AppError::BadRequest(format!("Invalid Content-Type '{}'", content_type))
                })?;
                let key = format!("{}.{}", video.id, subtype);
                storage
                    .upload_with_key(&key, data, content_type)
                    .await
                    .map_err(from_storage_error)?
            }
        };

        video.thumbnail_url = Some(url);
        let updated = self.videos.update_video(&video).await?;

        tracing::info!("Thumbnail published");
        Ok(updated)
    }
}
