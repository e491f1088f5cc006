use std::sync::Arc;

use tracing::{debug, info_span, warn, Instrument};

use ju_core::media::{DataUrl, IngestOutcome, MediaFile, MediaInput};
use ju_core::ports::MediaReaderPort;

/// Use case for turning a picked or dropped file into a profile image.
///
/// Only the first file of the input is considered. Non-image files and read
/// failures are reported as outcomes, never as errors; the caller decides
/// whether an accepted image is still wanted.
pub struct IngestProfileImage {
    reader: Arc<dyn MediaReaderPort>,
}

impl IngestProfileImage {
    pub fn new(reader: Arc<dyn MediaReaderPort>) -> Self {
        Self { reader }
    }

    /// Pick the file to ingest. Empty and non-image selections are answered
    /// immediately, without any I/O.
    pub fn select<'a>(&self, input: &'a MediaInput) -> Result<&'a MediaFile, IngestOutcome> {
        let Some(file) = input.first() else {
            debug!("media input contained no file");
            return Err(IngestOutcome::Empty);
        };

        if !file.is_image() {
            debug!(
                name = %file.name,
                media_type = %file.media_type,
                "ignoring non-image media"
            );
            return Err(IngestOutcome::Rejected {
                media_type: file.media_type.clone(),
            });
        }

        Ok(file)
    }

    /// Read an image file previously accepted by [`Self::select`].
    pub async fn read(&self, file: &MediaFile) -> IngestOutcome {
        let span = info_span!("usecase.media.ingest", name = %file.name);
        async {
            match self.reader.read(file).await {
                Ok(bytes) => {
                    debug!(name = %file.name, bytes = bytes.len(), "profile image read");
                    IngestOutcome::Accepted(DataUrl::encode(file.media_type.trim(), &bytes))
                }
                Err(err) => {
                    warn!(name = %file.name, error = %err, "failed to read profile image");
                    IngestOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    pub async fn execute(&self, input: &MediaInput) -> IngestOutcome {
        match self.select(input) {
            Ok(file) => self.read(file).await,
            Err(outcome) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct InMemoryReader {
        bytes: Vec<u8>,
        reads: Mutex<Vec<String>>,
    }

    impl InMemoryReader {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.to_vec(),
                reads: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl MediaReaderPort for InMemoryReader {
        async fn read(&self, file: &MediaFile) -> anyhow::Result<Vec<u8>> {
            self.reads.lock().unwrap().push(file.name.clone());
            Ok(self.bytes.clone())
        }
    }

    struct FailingReader;

    #[async_trait::async_trait]
    impl MediaReaderPort for FailingReader {
        async fn read(&self, _file: &MediaFile) -> anyhow::Result<Vec<u8>> {
            Err(anyhow::anyhow!("permission denied"))
        }
    }

    #[tokio::test]
    async fn test_image_is_encoded_as_data_url() {
        let reader = Arc::new(InMemoryReader::new(b"\x89PNG"));
        let use_case = IngestProfileImage::new(reader.clone());

        let outcome = use_case
            .execute(&MediaInput::Picked(vec![MediaFile::new("/tmp/me.png", "image/png")]))
            .await;

        assert_eq!(
            outcome,
            IngestOutcome::Accepted(DataUrl::encode("image/png", b"\x89PNG"))
        );
        assert_eq!(*reader.reads.lock().unwrap(), vec!["me.png".to_string()]);
    }

    #[tokio::test]
    async fn test_non_image_is_rejected_without_reading() {
        let reader = Arc::new(InMemoryReader::new(b"hello"));
        let use_case = IngestProfileImage::new(reader.clone());

        let outcome = use_case
            .execute(&MediaInput::Dropped(vec![MediaFile::new(
                "/tmp/notes.txt",
                "text/plain",
            )]))
            .await;

        assert_eq!(
            outcome,
            IngestOutcome::Rejected {
                media_type: "text/plain".into()
            }
        );
        assert!(reader.reads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_only_first_file_is_used() {
        let reader = Arc::new(InMemoryReader::new(b"x"));
        let use_case = IngestProfileImage::new(reader.clone());

        let outcome = use_case
            .execute(&MediaInput::Picked(vec![
                MediaFile::new("/tmp/doc.pdf", "application/pdf"),
                MediaFile::new("/tmp/me.png", "image/png"),
            ]))
            .await;

        assert!(matches!(outcome, IngestOutcome::Rejected { .. }));
        assert!(reader.reads.lock().unwrap().is_empty());
    }

    #[test]
    fn test_select_answers_without_reading() {
        let use_case = IngestProfileImage::new(Arc::new(FailingReader));
        let picked = MediaInput::Picked(vec![MediaFile::new("/tmp/me.webp", "image/webp")]);
        let dropped = MediaInput::Dropped(vec![MediaFile::new("/tmp/a.zip", "application/zip")]);

        assert_eq!(use_case.select(&picked).map(|f| f.name.as_str()), Ok("me.webp"));
        assert_eq!(
            use_case.select(&dropped),
            Err(IngestOutcome::Rejected {
                media_type: "application/zip".into()
            })
        );
        assert_eq!(
            use_case.select(&MediaInput::Dropped(Vec::new())),
            Err(IngestOutcome::Empty)
        );
    }

    #[tokio::test]
    async fn test_empty_selection_and_read_failure() {
        let use_case = IngestProfileImage::new(Arc::new(FailingReader));

        assert_eq!(
            use_case.execute(&MediaInput::Picked(Vec::new())).await,
            IngestOutcome::Empty
        );

        let outcome = use_case
            .execute(&MediaInput::Picked(vec![MediaFile::new("/tmp/me.jpg", "image/jpeg")]))
            .await;
        assert!(
            matches!(outcome, IngestOutcome::Failed { ref reason } if reason.contains("permission denied"))
        );
    }
}
