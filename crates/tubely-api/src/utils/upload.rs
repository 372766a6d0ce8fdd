//! Common utilities for file upload handlers

use axum::extract::multipart::{Field, MultipartError};
use bytes::{Bytes, BytesMut};
use tubely_core::AppError;

/// Base MIME type: parameters dropped, trimmed and lowercased.
///
/// `"Video/MP4; codecs=avc1"` becomes `"video/mp4"`.
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Second segment of a MIME type, used as a file extension.
pub fn mime_subtype(content_type: &str) -> Option<&str> {
    let base = content_type.split(';').next()?.trim();
    base.split('/').nth(1).map(str::trim).filter(|s| !s.is_empty())
}

/// A part could not be parsed out of the multipart body.
pub fn multipart_error(err: MultipartError) -> AppError {
    AppError::BadRequest(format!("Failed to read multipart: {}", err))
}

/// The body ended without the expected part.
pub fn missing_part(name: &str) -> AppError {
    AppError::BadRequest(format!("Missing multipart part '{}'", name))
}

/// Read a whole part into memory, failing once it exceeds `max_bytes`.
pub async fn read_field_limited(mut field: Field<'_>, max_bytes: u64) -> Result<Bytes, AppError> {
    let mut data = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?
    {
        if (data.len() + chunk.len()) as u64 > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds max {} bytes",
                max_bytes
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data.freeze())
}
