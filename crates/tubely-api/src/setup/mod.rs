//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tubely_core::Config;
use tubely_db::PgVideoRepository;
use tubely_processing::FfmpegToolkit;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let toolkit = FfmpegToolkit::new(
        config.ffprobe_path(),
        config.ffmpeg_path(),
        Duration::from_secs(config.media_tool_timeout_secs()),
    );

    let state = services::build_state(
        config.clone(),
        Arc::new(PgVideoRepository::new(pool)),
        storage,
        Arc::new(toolkit),
    );

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
