//! Storage setup: the S3 video store, the thumbnail target and the temp directory

use crate::services::publish::ThumbnailTarget;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::{Config, StorageBackend, ThumbnailMode};
use tubely_storage::{create_storage, Storage};

pub struct StorageSetup {
    pub videos: Arc<dyn Storage>,
    pub thumbnails: ThumbnailTarget,
}

pub async fn setup_storage(config: &Config) -> Result<StorageSetup> {
    let videos = create_storage(config, StorageBackend::S3)
        .await
        .context("Failed to initialize S3 storage")?;
    tracing::info!(
        bucket = config.s3_bucket().unwrap_or_default(),
        region = config.s3_region().unwrap_or_default(),
        endpoint = config.s3_endpoint().unwrap_or("aws"),
        "Video storage ready"
    );

    let thumbnails = match config.thumbnail_mode() {
        ThumbnailMode::Inline => ThumbnailTarget::Inline,
        ThumbnailMode::Local => {
            let assets = create_storage(config, StorageBackend::Local)
                .await
                .context("Failed to initialize assets directory")?;
            ThumbnailTarget::Assets(assets)
        }
    };
    tracing::info!(
        mode = %config.thumbnail_mode(),
        assets_root = %config.assets_root().display(),
        "Thumbnail publishing configured"
    );

    tokio::fs::create_dir_all(config.upload_temp_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to create upload temp dir {}",
                config.upload_temp_dir().display()
            )
        })?;

    Ok(StorageSetup { videos, thumbnails })
}
