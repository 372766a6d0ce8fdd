//! Staging of upload bodies on local disk.

use crate::error::StagingError;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::io::{self, SeekFrom};
use std::path::Path;
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

const STAGING_PREFIX: &str = "tubely-upload";
const STAGING_SUFFIX: &str = ".mp4";

/// An upload body copied to a uniquely named temporary file.
///
/// The file is deleted when this value is dropped, whichever path the
/// request takes.
#[derive(Debug)]
pub struct StagedUpload {
    file: File,
    path: TempPath,
    size: u64,
}

impl StagedUpload {
    /// Copy `body` into a new file under `dir`, rejecting bodies larger than
    /// `max_bytes`.
    ///
    /// On success the read position is rewound to the start of the file.
    pub async fn from_stream<S, E>(dir: &Path, body: S, max_bytes: u64) -> Result<Self, StagingError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let (std_file, path) = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(STAGING_SUFFIX)
            .tempfile_in(dir)
            .map_err(StagingError::Create)?
            .into_parts();
        let mut file = File::from_std(std_file);

        let mut body = std::pin::pin!(body);
        let mut size: u64 = 0;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| StagingError::Body(io::Error::other(e)))?;
            size += chunk.len() as u64;
            if size > max_bytes {
                return Err(StagingError::TooLarge { limit: max_bytes });
            }
            file.write_all(&chunk).await.map_err(StagingError::Write)?;
        }

        file.flush().await.map_err(StagingError::Write)?;
        file.seek(SeekFrom::Start(0))
            .await
            .map_err(StagingError::Write)?;

        tracing::debug!(path = %path.display(), size_bytes = size, "Upload staged");

        Ok(Self { file, path, size })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes written.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Open handle, positioned at the start after staging.
    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }
}
