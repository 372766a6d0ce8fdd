use chrono::Utc;
use sqlx::{PgPool, Postgres};
use tubely_core::models::{NewVideo, Video};
use tubely_core::AppError;
use uuid::Uuid;

/// Trait for video record operations
#[async_trait::async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create_video(&self, owner_id: Uuid, new_video: NewVideo) -> Result<Video, AppError>;

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Newest first
    async fn list_videos_for_owner(&self, owner_id: Uuid) -> Result<Vec<Video>, AppError>;

    /// Persist every mutable field of `video` and bump `updated_at`.
    ///
    /// Returns `AppError::NotFound` if the record no longer exists.
    async fn update_video(&self, video: &Video) -> Result<Video, AppError>;

    /// Returns whether a record was deleted
    async fn delete_video(&self, id: Uuid) -> Result<bool, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

const VIDEO_COLUMNS: &str =
    "id, owner_id, title, description, thumbnail_url, video_url, created_at, updated_at";

/// PostgreSQL-backed video repository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self, new_video), fields(db.table = "videos", db.operation = "insert"))]
    async fn create_video(&self, owner_id: Uuid, new_video: NewVideo) -> Result<Video, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            INSERT INTO videos (owner_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(owner_id)
        .bind(&new_video.title)
        .bind(&new_video.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(&format!(
            "SELECT {} FROM videos WHERE id = $1",
            VIDEO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_videos_for_owner(&self, owner_id: Uuid) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<Postgres, Video>(&format!(
            "SELECT {} FROM videos WHERE owner_id = $1 ORDER BY created_at DESC",
            VIDEO_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let updated = sqlx::query_as::<Postgres, Video>(&format!(
            r#"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, video_url = $5, updated_at = $6
            WHERE id = $1
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        ))
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "delete", db.record_id = %id))]
    async fn delete_video(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
