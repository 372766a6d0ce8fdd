//! Test helpers: build AppState and router for integration tests.
//!
//! Records live in `MockVideoRepository`, videos go to an in-memory object
//! store and the media toolkit is stubbed (or pointed at fake tool scripts),
//! so no Postgres, S3 or ffmpeg is needed. Run with `cargo test -p tubely-api`.

pub mod auth;

use axum_test::TestServer;
use object_store::memory::InMemory;
use object_store::ObjectStoreExt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tubely_api::constants;
use tubely_api::services::publish::ThumbnailTarget;
use tubely_api::setup::{routes, services, storage::StorageSetup};
use tubely_core::{BaseConfig, Config, ThumbnailMode, TubelyConfig};
use tubely_db::test_helpers::MockVideoRepository;
use tubely_processing::test_helpers::StubToolkit;
use tubely_processing::{FfmpegToolkit, MediaToolkit};
use tubely_storage::{LocalStorage, S3Storage};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const TEST_BUCKET: &str = "tubely-videos";
pub const TEST_REGION: &str = "us-east-2";
pub const MAX_VIDEO_BYTES: u64 = 64 * 1024;
pub const MAX_THUMBNAIL_BYTES: u64 = 1024;

/// API path prefix for tests.
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus the doubles behind it.
pub struct TestApp {
    pub server: TestServer,
    pub videos: MockVideoRepository,
    pub objects: Arc<InMemory>,
    /// Set when the app runs on `StubToolkit`
    pub stub: Option<StubToolkit>,
    pub temp_dir: TempDir,
    pub assets_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Remux calls seen by the stub toolkit.
    pub fn remux_calls(&self) -> usize {
        self.stub.as_ref().map_or(0, StubToolkit::remux_calls)
    }

    /// Files left in the upload temp directory.
    pub fn temp_files(&self) -> usize {
        count_entries(self.temp_dir.path())
    }

    pub async fn stored_object(&self, key: &str) -> Option<bytes::Bytes> {
        let location = object_store::path::Path::from(key);
        match self.objects.get(&location).await {
            Ok(result) => Some(result.bytes().await.unwrap()),
            Err(object_store::Error::NotFound { .. }) => None,
            Err(e) => panic!("object store error: {}", e),
        }
    }
}

fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

pub fn test_config(mode: ThumbnailMode, temp_dir: &Path, assets_dir: &Path) -> Config {
    Config(Box::new(TubelyConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 1,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            environment: "test".to_string(),
        },
        database_url: "postgresql://unused".to_string(),
        s3_bucket: Some(TEST_BUCKET.to_string()),
        s3_region: Some(TEST_REGION.to_string()),
        s3_endpoint: None,
        aws_region: None,
        thumbnail_mode: mode,
        assets_root: assets_dir.to_path_buf(),
        assets_base_url: "http://localhost:8091/assets".to_string(),
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        upload_temp_dir: temp_dir.to_path_buf(),
        max_video_size_bytes: MAX_VIDEO_BYTES,
        max_thumbnail_size_bytes: MAX_THUMBNAIL_BYTES,
        media_tool_timeout_secs: 5,
    }))
}

/// Inline thumbnails, 16:9 videos.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(ThumbnailMode::Inline, StubToolkit::with_dimensions(1920, 1080)).await
}

pub async fn setup_test_app_with(mode: ThumbnailMode, toolkit: StubToolkit) -> TestApp {
    build_test_app(mode, Arc::new(toolkit.clone()), Some(toolkit)).await
}

/// Inline thumbnails, videos run through `FfmpegToolkit` with the given binaries.
pub async fn setup_ffmpeg_test_app(ffprobe: &Path, ffmpeg: &Path) -> TestApp {
    let toolkit = FfmpegToolkit::new(ffprobe, ffmpeg, Duration::from_secs(5));
    build_test_app(ThumbnailMode::Inline, Arc::new(toolkit), None).await
}

async fn build_test_app(
    mode: ThumbnailMode,
    media: Arc<dyn MediaToolkit>,
    stub: Option<StubToolkit>,
) -> TestApp {
    let temp_dir = tempfile::tempdir().unwrap();
    let assets_dir = tempfile::tempdir().unwrap();
    let config = test_config(mode, temp_dir.path(), assets_dir.path());

    let videos = MockVideoRepository::new();
    let objects = Arc::new(InMemory::new());
    let video_storage = Arc::new(S3Storage::with_store(
        objects.clone(),
        TEST_BUCKET.to_string(),
        TEST_REGION.to_string(),
        None,
    ));
    let thumbnails = match mode {
        ThumbnailMode::Inline => ThumbnailTarget::Inline,
        ThumbnailMode::Local => ThumbnailTarget::Assets(Arc::new(
            LocalStorage::new(assets_dir.path(), config.assets_base_url().to_string())
                .await
                .unwrap(),
        )),
    };

    let state = services::build_state(
        config.clone(),
        Arc::new(videos.clone()),
        StorageSetup {
            videos: video_storage,
            thumbnails,
        },
        media,
    );
    let app = routes::setup_routes(&config, state).unwrap();
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        videos,
        objects,
        stub,
        temp_dir,
        assets_dir,
    }
}
