//! Thumbnail publishing integration tests.
//!
//! Run with: `cargo test -p tubely-api --test thumbnail_upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::auth::{bearer, token_for};
use helpers::{api_path, setup_test_app, setup_test_app_with};
use serde_json::Value;
use tubely_core::ThumbnailMode;
use tubely_processing::test_helpers::StubToolkit;
use uuid::Uuid;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

fn thumbnail_form(data: &[u8], mime: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::copy_from_slice(data))
        .file_name("thumb.png")
        .mime_type(mime);
    MultipartForm::new().add_part("thumbnail", part)
}

#[tokio::test]
async fn test_inline_thumbnail_is_data_url() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.videos.insert_video(owner, "Inline");

    let response = app
        .client()
        .post(&api_path(&format!("/thumbnail_upload/{}", video.id)))
        .add_header("Authorization", bearer(&token_for(owner)))
        .multipart(thumbnail_form(b"abc", "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["thumbnail_url"], "data:image/png;base64,YWJj");
    assert_eq!(
        app.videos.stored(video.id).unwrap().thumbnail_url.as_deref(),
        Some("data:image/png;base64,YWJj")
    );
}

#[tokio::test]
async fn test_local_thumbnail_is_served_from_assets() {
    let app = setup_test_app_with(
        ThumbnailMode::Local,
        StubToolkit::with_dimensions(1920, 1080),
    )
    .await;
    let owner = Uuid::new_v4();
    let video = app.videos.insert_video(owner, "Local");

    let response = app
        .client()
        .post(&api_path(&format!("/thumbnail_upload/{}", video.id)))
        .add_header("Authorization", bearer(&token_for(owner)))
        .multipart(thumbnail_form(PNG_BYTES, "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(
        body["thumbnail_url"],
        format!("http://localhost:8091/assets/{}.png", video.id)
    );

    let on_disk = std::fs::read(app.assets_dir.path().join(format!("{}.png", video.id))).unwrap();
    assert_eq!(on_disk, PNG_BYTES);

    let served = app
        .client()
        .get(&format!("/assets/{}.png", video.id))
        .await;
    assert_eq!(served.status_code(), 200);
    assert_eq!(served.as_bytes().as_ref(), PNG_BYTES);
}

#[tokio::test]
async fn test_thumbnail_requires_token() {
    let app = setup_test_app().await;
    let video = app.videos.insert_video(Uuid::new_v4(), "No token");

    let response = app
        .client()
        .post(&api_path(&format!("/thumbnail_upload/{}", video.id)))
        .multipart(thumbnail_form(PNG_BYTES, "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_thumbnail_non_owner_is_unauthorized() {
    let app = setup_test_app().await;
    let video = app.videos.insert_video(Uuid::new_v4(), "Not yours");

    let response = app
        .client()
        .post(&api_path(&format!("/thumbnail_upload/{}", video.id)))
        .add_header("Authorization", bearer(&token_for(Uuid::new_v4())))
        .multipart(thumbnail_form(PNG_BYTES, "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(app.videos.stored(video.id).unwrap().thumbnail_url.is_none());
}

#[tokio::test]
async fn test_thumbnail_unknown_video_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path(&format!("/thumbnail_upload/{}", Uuid::new_v4())))
        .add_header("Authorization", bearer(&token_for(Uuid::new_v4())))
        .multipart(thumbnail_form(PNG_BYTES, "image/png"))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_thumbnail_without_content_type_is_bad_request() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.videos.insert_video(owner, "Untyped");

    // Hand-built so the part carries no Content-Type header at all.
    let body = "--XBOUNDARY\r\n\
        Content-Disposition: form-data; name=\"thumbnail\"; filename=\"thumb.png\"\r\n\
        \r\n\
        fake-image\r\n\
        --XBOUNDARY--\r\n";
    let response = app
        .client()
        .post(&api_path(&format!("/thumbnail_upload/{}", video.id)))
        .add_header("Authorization", bearer(&token_for(owner)))
        .content_type("multipart/form-data; boundary=XBOUNDARY")
        .bytes(bytes::Bytes::from_static(body.as_bytes()))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(app.videos.stored(video.id).unwrap().thumbnail_url.is_none());
}

#[tokio::test]
async fn test_oversize_thumbnail_is_payload_too_large() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.videos.insert_video(owner, "Big thumb");
    let data = vec![1u8; helpers::MAX_THUMBNAIL_BYTES as usize + 1];

    let response = app
        .client()
        .post(&api_path(&format!("/thumbnail_upload/{}", video.id)))
        .add_header("Authorization", bearer(&token_for(owner)))
        .multipart(thumbnail_form(&data, "image/png"))
        .await;

    assert_eq!(response.status_code(), 413);
}
