//! Configuration validation
//!
//! Catches misconfiguration at startup, before any connection is opened.

use anyhow::Result;
use tubely_core::Config;

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Set explicit origins via CORS_ORIGINS."
        ));
    }

    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.max_thumbnail_size_bytes() > config.max_video_size_bytes() {
        tracing::warn!(
            max_thumbnail_size_bytes = config.max_thumbnail_size_bytes(),
            max_video_size_bytes = config.max_video_size_bytes(),
            "Thumbnail cap exceeds video cap; thumbnails are limited by the request body limit"
        );
    }

    Ok(())
}
