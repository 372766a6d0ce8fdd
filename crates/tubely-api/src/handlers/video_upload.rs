use crate::auth::AuthUser;
use crate::constants::VIDEO_FIELD;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{missing_part, multipart_error};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::models::Video;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/video_upload/{video_id}",
    tag = "uploads",
    params(("video_id" = Uuid, Path, description = "Video ID")),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "MP4 in part `video`"),
    responses(
        (status = 200, description = "Video published", body = Video),
        (status = 400, description = "Malformed upload, unsupported type or unprocessable video", body = ErrorResponse),
        (status = 401, description = "Unauthenticated or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "Video too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(video_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)?;
    let mut multipart = multipart?;

    // The part is streamed straight into the staging file.
    let field = loop {
        match multipart.next_field().await.map_err(multipart_error)? {
            Some(field) if field.name() == Some(VIDEO_FIELD) => break field,
            Some(_) => continue,
            None => return Err(missing_part(VIDEO_FIELD).into()),
        }
    };
    let content_type = field.content_type().map(str::to_string);

    let video = state
        .video_publisher
        .publish(video_id, user.user_id, content_type.as_deref(), field)
        .await?;
    Ok(Json(video))
}
