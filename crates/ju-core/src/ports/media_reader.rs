use async_trait::async_trait;

use crate::media::MediaFile;

/// Reads the content of a selected file.
///
/// This is the only suspend point of the wizard.
#[async_trait]
pub trait MediaReaderPort: Send + Sync {
    async fn read(&self, file: &MediaFile) -> anyhow::Result<Vec<u8>>;
}
