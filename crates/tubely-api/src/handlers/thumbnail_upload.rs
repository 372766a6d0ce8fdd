use crate::auth::AuthUser;
use crate::constants::THUMBNAIL_FIELD;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{missing_part, multipart_error, read_field_limited};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::models::Video;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/thumbnail_upload/{video_id}",
    tag = "uploads",
    params(("video_id" = Uuid, Path, description = "Video ID")),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Image in part `thumbnail`"),
    responses(
        (status = 200, description = "Thumbnail published", body = Video),
        (status = 400, description = "Malformed upload or missing content type", body = ErrorResponse),
        (status = 401, description = "Unauthenticated or not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "Thumbnail too large", body = ErrorResponse)
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(video_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)?;
    let mut multipart = multipart?;

    let publisher = &state.thumbnail_publisher;
    let field = loop {
        match multipart.next_field().await.map_err(multipart_error)? {
            Some(field) if field.name() == Some(THUMBNAIL_FIELD) => break field,
            Some(_) => continue,
            None => return Err(missing_part(THUMBNAIL_FIELD).into()),
        }
    };
    let content_type = field.content_type().map(str::to_string);
    let data = read_field_limited(field, publisher.max_bytes()).await?;

    let video = publisher
        .publish(video_id, user.user_id, content_type.as_deref(), data)
        .await?;
    Ok(Json(video))
}
