//! Failures from the real ffprobe/ffmpeg toolkit, driven by fake tool scripts.
//!
//! Run with: `cargo test -p tubely-api --test media_tool_errors_test`
#![cfg(unix)]

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::auth::{bearer, token_for};
use helpers::{api_path, setup_ffmpeg_test_app};
use serde_json::Value;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Echo the last argument (the file path) into stderr, the way ffmpeg does.
const FAILING_TOOL: &str = r#"for last; do :; done
echo "$last: Invalid data found when processing input" >&2
exit 1"#;

const PROBE_1080P: &str =
    r#"echo '{"streams":[{"index":0,"codec_type":"video","width":1920,"height":1080}]}'"#;

fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn video_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "video",
        Part::bytes(bytes::Bytes::from_static(b"not really an mp4"))
            .file_name("clip.mp4")
            .mime_type("video/mp4"),
    )
}

#[tokio::test]
async fn test_probe_failure_hides_tool_output() {
    let tools = tempfile::tempdir().unwrap();
    let ffprobe = fake_tool(tools.path(), "ffprobe", FAILING_TOOL);
    let ffmpeg = fake_tool(tools.path(), "ffmpeg", "exit 0");
    let app = setup_ffmpeg_test_app(&ffprobe, &ffmpeg).await;
    let owner = Uuid::new_v4();
    let video = app.videos.insert_video(owner, "Garbage");

    let response = app
        .client()
        .post(&api_path(&format!("/video_upload/{}", video.id)))
        .add_header("Authorization", bearer(&token_for(owner)))
        .multipart(video_form())
        .await;

    assert_eq!(response.status_code(), 400);
    let text = response.text();
    let temp_dir = app.temp_dir.path().to_string_lossy().to_string();
    assert!(!text.contains(&temp_dir), "temp path in response: {}", text);
    assert!(!text.contains("Invalid data found"), "stderr in response: {}", text);
    let body: Value = response.json();
    assert_eq!(body["error"], "Could not inspect video");
    assert_eq!(app.temp_files(), 0);
}

#[tokio::test]
async fn test_remux_failure_hides_tool_output() {
    let tools = tempfile::tempdir().unwrap();
    let ffprobe = fake_tool(tools.path(), "ffprobe", PROBE_1080P);
    let ffmpeg = fake_tool(tools.path(), "ffmpeg", FAILING_TOOL);
    let app = setup_ffmpeg_test_app(&ffprobe, &ffmpeg).await;
    let owner = Uuid::new_v4();
    let video = app.videos.insert_video(owner, "Truncated");

    let response = app
        .client()
        .post(&api_path(&format!("/video_upload/{}", video.id)))
        .add_header("Authorization", bearer(&token_for(owner)))
        .multipart(video_form())
        .await;

    assert_eq!(response.status_code(), 400);
    let text = response.text();
    let temp_dir = app.temp_dir.path().to_string_lossy().to_string();
    assert!(!text.contains(&temp_dir), "temp path in response: {}", text);
    assert!(!text.contains(".processing"), "output path in response: {}", text);
    let body: Value = response.json();
    assert_eq!(body["error"], "Could not process video");
    assert!(app.videos.stored(video.id).unwrap().video_url.is_none());
    assert_eq!(app.temp_files(), 0);
}
