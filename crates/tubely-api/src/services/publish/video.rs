use super::load_owned_video;
use crate::constants::VIDEO_MP4;
use crate::error::{
    from_classification_error, from_normalization_error, from_staging_error, from_storage_error,
};
use crate::utils::upload::normalize_mime_type;
use bytes::Bytes;
use futures::Stream;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tubely_core::models::Video;
use tubely_core::AppError;
use tubely_db::VideoRepository;
use tubely_processing::{MediaToolkit, StagedUpload};
use tubely_storage::{derive_video_key, Storage};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct VideoPublisherConfig {
    /// Directory for staged and normalized temp files
    pub temp_dir: PathBuf,
    pub max_upload_bytes: u64,
}

/// Stages, inspects, normalizes and commits a video, then records its URL.
#[derive(Clone)]
pub struct VideoPublisher {
    videos: Arc<dyn VideoRepository>,
    storage: Arc<dyn Storage>,
    toolkit: Arc<dyn MediaToolkit>,
    config: VideoPublisherConfig,
}

impl VideoPublisher {
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        storage: Arc<dyn Storage>,
        toolkit: Arc<dyn MediaToolkit>,
        config: VideoPublisherConfig,
    ) -> Self {
        Self {
            videos,
            storage,
            toolkit,
            config,
        }
    }

    /// Publish the video carried by `body` and return the updated record.
    ///
    /// The staged upload and the normalized output are request-scoped temp
    /// files; both are gone when this returns, whatever the outcome. The
    /// record is only written after the object store accepted the upload.
    #[tracing::instrument(skip(self, body), fields(video_id = %video_id, user_id = %requester_id))]
    pub async fn publish<S, E>(
        &self,
        video_id: Uuid,
        requester_id: Uuid,
        content_type: Option<&str>,
        body: S,
    ) -> Result<Video, AppError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let start = Instant::now();
        let mut video = load_owned_video(&self.videos, video_id, requester_id).await?;

        let media_type = content_type.map(normalize_mime_type).unwrap_or_default();
        if media_type != VIDEO_MP4 {
            return Err(AppError::UnsupportedMediaType(format!(
                "Unsupported media type '{}', expected {}",
                media_type, VIDEO_MP4
            )));
        }

        let staged =
            StagedUpload::from_stream(&self.config.temp_dir, body, self.config.max_upload_bytes)
                .await
                .map_err(from_staging_error)?;

        let aspect_ratio = self
            .toolkit
            .inspect(staged.path())
            .await
            .map_err(from_classification_error)?;

        let normalized = self
            .toolkit
            .remux_faststart(staged.path())
            .await
            .map_err(from_normalization_error)?;

        let key = derive_video_key(aspect_ratio);
        let url = self
            .storage
            .upload_file(&key, &normalized, VIDEO_MP4)
            .await
            .map_err(from_storage_error)?;

        let size_bytes = staged.size();
        drop(normalized);
        drop(staged);

        video.video_url = Some(url);
        let updated = self.videos.update_video(&video).await?;

        tracing::info!(
            key = %key,
            aspect_ratio = %aspect_ratio,
            size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Video published"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::stream;
    use object_store::memory::InMemory;
    use std::path::Path;
    use tubely_core::StorageBackend;
    use tubely_db::test_helpers::MockVideoRepository;
    use tubely_processing::test_helpers::StubToolkit;
    use tubely_storage::{S3Storage, StorageError, StorageResult};

    const URL_PREFIX: &str = "https://tubely-videos.s3.us-east-2.amazonaws.com/";

    struct Fixture {
        repo: MockVideoRepository,
        storage: Arc<S3Storage>,
        temp_dir: tempfile::TempDir,
        owner: Uuid,
        video: Video,
    }

    impl Fixture {
        fn new() -> Self {
            let repo = MockVideoRepository::new();
            let owner = Uuid::new_v4();
            let video = repo.insert_video(owner, "clip");
            let storage = Arc::new(S3Storage::with_store(
                Arc::new(InMemory::new()),
                "tubely-videos".to_string(),
                "us-east-2".to_string(),
                None,
            ));
            Self {
                repo,
                storage,
                temp_dir: tempfile::tempdir().unwrap(),
                owner,
                video,
            }
        }

        fn publisher(&self, toolkit: StubToolkit) -> VideoPublisher {
            self.publisher_with(toolkit, self.storage.clone(), 1024)
        }

        fn publisher_with(
            &self,
            toolkit: StubToolkit,
            storage: Arc<dyn Storage>,
            max_upload_bytes: u64,
        ) -> VideoPublisher {
            VideoPublisher::new(
                Arc::new(self.repo.clone()),
                storage,
                Arc::new(toolkit),
                VideoPublisherConfig {
                    temp_dir: self.temp_dir.path().to_path_buf(),
                    max_upload_bytes,
                },
            )
        }

        fn temp_files(&self) -> usize {
            std::fs::read_dir(self.temp_dir.path()).unwrap().count()
        }

        fn stored_video(&self) -> Video {
            self.repo.stored(self.video.id).unwrap()
        }
    }

    fn body(data: &'static [u8]) -> impl Stream<Item = Result<Bytes, std::io::Error>> {
        stream::iter(vec![Ok(Bytes::from_static(data))])
    }

    struct FailingStorage;

    #[async_trait]
    impl Storage for FailingStorage {
        async fn upload_with_key(&self, _: &str, _: Bytes, _: &str) -> StorageResult<String> {
            Err(StorageError::UploadFailed("connection reset".to_string()))
        }

        async fn upload_file(&self, _: &str, _: &Path, _: &str) -> StorageResult<String> {
            Err(StorageError::UploadFailed("connection reset".to_string()))
        }

        async fn exists(&self, _: &str) -> StorageResult<bool> {
            Ok(false)
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::S3
        }
    }

    #[tokio::test]
    async fn test_landscape_video_published_to_s3() {
        let fx = Fixture::new();
        let publisher = fx.publisher(StubToolkit::with_dimensions(1920, 1080));

        let updated = publisher
            .publish(fx.video.id, fx.owner, Some("video/mp4"), body(b"mp4-bytes"))
            .await
            .unwrap();

        let url = updated.video_url.clone().unwrap();
        let key = url.strip_prefix(URL_PREFIX).unwrap();
        let (prefix, file) = key.split_once('/').unwrap();
        assert_eq!(prefix, "landscape");
        let hex = file.strip_suffix(".mp4").unwrap();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));

        assert!(fx.storage.exists(key).await.unwrap());
        assert_eq!(fx.stored_video().video_url, Some(url));
        assert_eq!(fx.temp_files(), 0);
    }

    #[tokio::test]
    async fn test_portrait_video_gets_portrait_prefix() {
        let fx = Fixture::new();
        let publisher = fx.publisher(StubToolkit::with_dimensions(1080, 1920));

        let updated = publisher
            .publish(fx.video.id, fx.owner, Some("video/mp4"), body(b"mp4"))
            .await
            .unwrap();

        assert!(updated
            .video_url
            .unwrap()
            .starts_with(&format!("{}portrait/", URL_PREFIX)));
    }

    #[tokio::test]
    async fn test_square_video_gets_other_prefix() {
        let fx = Fixture::new();
        let publisher = fx.publisher(StubToolkit::with_dimensions(1080, 1080));

        let updated = publisher
            .publish(fx.video.id, fx.owner, Some("video/mp4"), body(b"mp4"))
            .await
            .unwrap();

        assert!(updated
            .video_url
            .unwrap()
            .starts_with(&format!("{}other/", URL_PREFIX)));
    }

    #[tokio::test]
    async fn test_content_type_parameters_are_ignored() {
        let fx = Fixture::new();
        let publisher = fx.publisher(StubToolkit::with_dimensions(1920, 1080));

        let result = publisher
            .publish(
                fx.video.id,
                fx.owner,
                Some("Video/MP4; codecs=\"avc1.42E01E\""),
                body(b"mp4"),
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_non_owner_is_unauthorized() {
        let fx = Fixture::new();
        let toolkit = StubToolkit::with_dimensions(1920, 1080);
        let publisher = fx.publisher(toolkit.clone());

        let err = publisher
            .publish(fx.video.id, Uuid::new_v4(), Some("video/mp4"), body(b"mp4"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
        assert_eq!(fx.stored_video(), fx.video);
        assert_eq!(toolkit.remux_calls(), 0);
        assert_eq!(fx.temp_files(), 0);
    }

    #[tokio::test]
    async fn test_unknown_video_is_not_found() {
        let fx = Fixture::new();
        let publisher = fx.publisher(StubToolkit::with_dimensions(1920, 1080));

        let err = publisher
            .publish(Uuid::new_v4(), fx.owner, Some("video/mp4"), body(b"mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unsupported_content_type_rejected_before_staging() {
        let fx = Fixture::new();
        let publisher = fx.publisher(StubToolkit::with_dimensions(1920, 1080));

        for content_type in [Some("video/quicktime"), Some("image/png"), None] {
            let err = publisher
                .publish(fx.video.id, fx.owner, content_type, body(b"mov"))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::UnsupportedMediaType(_)));
        }
        assert_eq!(fx.temp_files(), 0);
        assert!(fx.stored_video().video_url.is_none());
    }

    #[tokio::test]
    async fn test_normalizer_failure_is_bad_request_and_cleans_up() {
        let fx = Fixture::new();
        let publisher = fx.publisher(StubToolkit::with_dimensions(1920, 1080).failing_remux());

        let err = publisher
            .publish(fx.video.id, fx.owner, Some("video/mp4"), body(b"mp4"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(fx.stored_video(), fx.video);
        assert_eq!(fx.temp_files(), 0);
    }

    #[tokio::test]
    async fn test_inspector_failure_skips_normalizer() {
        let fx = Fixture::new();
        let toolkit = StubToolkit::failing_probe();
        let publisher = fx.publisher(toolkit.clone());

        let err = publisher
            .publish(fx.video.id, fx.owner, Some("video/mp4"), body(b"mp4"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(toolkit.remux_calls(), 0);
        assert_eq!(fx.temp_files(), 0);
    }

    #[tokio::test]
    async fn test_oversize_upload_is_payload_too_large() {
        let fx = Fixture::new();
        let publisher =
            fx.publisher_with(StubToolkit::with_dimensions(1920, 1080), fx.storage.clone(), 4);

        let err = publisher
            .publish(fx.video.id, fx.owner, Some("video/mp4"), body(b"too many bytes"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PayloadTooLarge(_)));
        assert_eq!(fx.temp_files(), 0);
    }

    #[tokio::test]
    async fn test_commit_failure_leaves_record_unchanged() {
        let fx = Fixture::new();
        let publisher = fx.publisher_with(
            StubToolkit::with_dimensions(1920, 1080),
            Arc::new(FailingStorage),
            1024,
        );

        let err = publisher
            .publish(fx.video.id, fx.owner, Some("video/mp4"), body(b"mp4"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
        assert!(fx.stored_video().video_url.is_none());
        assert_eq!(fx.temp_files(), 0);
    }
}
