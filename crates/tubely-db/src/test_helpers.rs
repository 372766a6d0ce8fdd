//! In-memory repository for tests that should not need Postgres

use crate::video::VideoRepository;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tubely_core::models::{NewVideo, Video};
use tubely_core::AppError;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct MockVideoRepository {
    videos: Arc<Mutex<HashMap<Uuid, Video>>>,
}

impl MockVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record owned by `owner_id`.
    pub fn insert_video(&self, owner_id: Uuid, title: &str) -> Video {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            owner_id,
            title: title.to_string(),
            description: String::new(),
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        };
        self.videos.lock().unwrap().insert(video.id, video.clone());
        video
    }

    /// Snapshot of a record, bypassing the trait.
    pub fn stored(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait::async_trait]
impl VideoRepository for MockVideoRepository {
    async fn create_video(&self, owner_id: Uuid, new_video: NewVideo) -> Result<Video, AppError> {
        let video = self.insert_video(owner_id, &new_video.title);
        let mut videos = self.videos.lock().unwrap();
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::Internal("seeded video vanished".to_string()))?;
        stored.description = new_video.description;
        Ok(stored.clone())
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.stored(id))
    }

    async fn list_videos_for_owner(&self, owner_id: Uuid) -> Result<Vec<Video>, AppError> {
        let mut videos: Vec<Video> = self
            .videos
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.owner_id == owner_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }

    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let mut videos = self.videos.lock().unwrap();
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;
        *stored = Video {
            updated_at: Utc::now(),
            ..video.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_video(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.videos.lock().unwrap().remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
