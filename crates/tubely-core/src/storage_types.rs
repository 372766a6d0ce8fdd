use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// How uploaded thumbnails are published.
///
/// Chosen once at startup; a publish call never switches form based on content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailMode {
    /// `data:<content-type>;base64,<payload>` stored directly on the record
    #[default]
    Inline,
    /// `<videoID>.<subtype>` written under the public assets root
    Local,
}

impl FromStr for ThumbnailMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inline" | "data" | "data-url" => Ok(ThumbnailMode::Inline),
            "local" | "file" => Ok(ThumbnailMode::Local),
            _ => Err(anyhow::anyhow!("Invalid thumbnail mode: {}", s)),
        }
    }
}

impl Display for ThumbnailMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ThumbnailMode::Inline => write!(f, "inline"),
            ThumbnailMode::Local => write!(f, "local"),
        }
    }
}
