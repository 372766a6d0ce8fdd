//! Aspect-ratio classification.
//!
//! Classification compares the true `width / height` ratio against 16:9 and
//! 9:16 within [`ASPECT_RATIO_TOLERANCE`]. Integer-truncated division is not
//! used: it maps every ratio in `[1, 2)` to 16:9 and every ratio below 1 to
//! 9:16, so 4:3 and square videos would be misfiled.

use crate::error::ClassificationError;
use tubely_core::models::AspectRatio;

/// Maximum absolute difference from the reference ratio.
pub const ASPECT_RATIO_TOLERANCE: f64 = 0.01;

const LANDSCAPE: f64 = 16.0 / 9.0;
const PORTRAIT: f64 = 9.0 / 16.0;

pub fn classify_aspect_ratio(width: u32, height: u32) -> Result<AspectRatio, ClassificationError> {
    if width == 0 || height == 0 {
        return Err(ClassificationError::InvalidDimensions { width, height });
    }

    let ratio = f64::from(width) / f64::from(height);
    let class = if (ratio - LANDSCAPE).abs() < ASPECT_RATIO_TOLERANCE {
        AspectRatio::Landscape
    } else if (ratio - PORTRAIT).abs() < ASPECT_RATIO_TOLERANCE {
        AspectRatio::Portrait
    } else {
        AspectRatio::Other
    };

    Ok(class)
}
