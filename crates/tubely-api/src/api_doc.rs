//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use tubely_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Video sharing backend: draft video records, thumbnail publishing and fast-start MP4 publishing to S3. All endpoints except health require a bearer JWT."
    ),
    paths(
        handlers::health::health_check,
        handlers::videos::create_video,
        handlers::videos::list_videos,
        handlers::videos::get_video,
        handlers::videos::delete_video,
        handlers::thumbnail_upload::upload_thumbnail,
        handlers::video_upload::upload_video,
    ),
    components(
        schemas(
            models::Video,
            models::NewVideo,
            models::AspectRatio,
            error::ErrorResponse,
            handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Dependency health"),
        (name = "videos", description = "Video record management"),
        (name = "uploads", description = "Thumbnail and video publishing")
    )
)]
pub struct ApiDoc;
