//! Video record CRUD

use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tubely_core::models::{NewVideo, Video};
use tubely_core::AppError;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body = NewVideo,
    responses(
        (status = 201, description = "Draft video created", body = Video),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, payload), fields(user_id = %user.user_id))]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    payload: Result<Json<NewVideo>, JsonRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Json(new_video) = payload?;
    if new_video.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()).into());
    }

    let video = state.videos.create_video(user.user_id, new_video).await?;
    tracing::info!(video_id = %video.id, "Video created");
    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    responses(
        (status = 200, description = "Caller's videos, newest first", body = [Video]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<Video>>, HttpAppError> {
    Ok(Json(state.videos.list_videos_for_owner(user.user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(("video_id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video record", body = Video),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(video_id): Path<String>,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)?;
    let video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;
    Ok(Json(video))
}

#[utoipa::path(
    delete,
    path = "/api/videos/{video_id}",
    tag = "videos",
    params(("video_id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 401, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(video_id): Path<String>,
) -> Result<StatusCode, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)?;
    let video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if !video.is_owned_by(user.user_id) {
        return Err(AppError::Unauthorized("You are not the owner of this video".to_string()).into());
    }

    if !state.videos.delete_video(video_id).await? {
        return Err(AppError::NotFound("Video not found".to_string()).into());
    }

    tracing::info!(video_id = %video_id, "Video deleted");
    Ok(StatusCode::NO_CONTENT)
}
