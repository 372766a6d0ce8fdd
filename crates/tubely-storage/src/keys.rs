//! Storage key derivation for published videos.
//!
//! Key format: `<landscape|portrait|other>/<32 random bytes as hex>.mp4`.

use rand::RngCore;
use tubely_core::models::AspectRatio;

const VIDEO_KEY_RANDOM_BYTES: usize = 32;
const VIDEO_KEY_EXTENSION: &str = "mp4";

/// Derive a fresh object key for a video of the given aspect-ratio class.
///
/// The random segment comes from the thread-local CSPRNG and never from user
/// input, so keys cannot be guessed or ordered.
pub fn derive_video_key(aspect_ratio: AspectRatio) -> String {
    let mut id = [0u8; VIDEO_KEY_RANDOM_BYTES];
    rand::rng().fill_bytes(&mut id);
    format!(
        "{}/{}.{}",
        aspect_ratio.key_prefix(),
        hex::encode(id),
        VIDEO_KEY_EXTENSION
    )
}
