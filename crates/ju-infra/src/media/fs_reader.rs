//! File-system media reader
//!
//! Reads the bytes of a selected profile image from disk.

use anyhow::Context;
use async_trait::async_trait;
use ju_core::media::MediaFile;
use ju_core::ports::MediaReaderPort;
use tokio::fs;
use tracing::debug;

/// Upper bound on the size of an image embedded into the snapshot.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

pub struct FsMediaReader {
    max_bytes: u64,
}

impl FsMediaReader {
    pub fn new() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_bytes(max_bytes: u64) -> Self {
        Self { max_bytes }
    }
}

impl Default for FsMediaReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaReaderPort for FsMediaReader {
    async fn read(&self, file: &MediaFile) -> anyhow::Result<Vec<u8>> {
        let metadata = fs::metadata(&file.path)
            .await
            .with_context(|| format!("stat media file failed: {}", file.path.display()))?;
        if metadata.len() > self.max_bytes {
            anyhow::bail!(
                "media file too large: {} bytes (limit {})",
                metadata.len(),
                self.max_bytes
            );
        }

        let bytes = fs::read(&file.path)
            .await
            .with_context(|| format!("read media file failed: {}", file.path.display()))?;
        debug!(name = %file.name, bytes = bytes.len(), "read media file");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_returns_file_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("avatar.png");
        fs::write(&path, b"\x89PNG\r\n").await.unwrap();

        let bytes = FsMediaReader::new()
            .read(&MediaFile::from_path(&path))
            .await
            .unwrap();

        assert_eq!(bytes, b"\x89PNG\r\n");
    }

    #[tokio::test]
    async fn test_read_missing_file_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = MediaFile::from_path(temp_dir.path().join("missing.png"));

        let result = FsMediaReader::new().read(&file).await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("stat media file failed"));
    }

    #[tokio::test]
    async fn test_read_rejects_oversized_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.png");
        fs::write(&path, vec![0u8; 64]).await.unwrap();

        let result = FsMediaReader::with_max_bytes(16)
            .read(&MediaFile::from_path(&path))
            .await;

        assert!(result.unwrap_err().to_string().contains("too large"));
    }
}
