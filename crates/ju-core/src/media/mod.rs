//! Profile image media models
//!
//! A selected or dropped file is described by [`MediaFile`]. Only files
//! whose declared media type is in the `image/` category are accepted; the
//! accepted bytes are embedded as a `data:` URL so the preview can be
//! restored from a snapshot without the original file handle.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

const IMAGE_CATEGORY: &str = "image/";
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// A file offered to the profile image field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    pub name: String,
    /// Declared media type, e.g. `image/png`. May be empty.
    pub media_type: String,
    pub path: PathBuf,
}

impl MediaFile {
    pub fn new(path: impl Into<PathBuf>, media_type: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            media_type: media_type.into(),
            path,
        }
    }

    /// Build a file whose media type is guessed from its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let media_type = guess_media_type(&path).to_string();
        Self::new(path, media_type)
    }

    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.media_type)
    }
}

/// How a file reached the wizard. Both variants share one ingestion path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaInput {
    /// Selection from a file picker.
    Picked(Vec<MediaFile>),
    /// Payload of a drag-and-drop.
    Dropped(Vec<MediaFile>),
}

impl MediaInput {
    /// Only one file is ingested per call.
    pub fn first(&self) -> Option<&MediaFile> {
        match self {
            MediaInput::Picked(files) | MediaInput::Dropped(files) => files.first(),
        }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, MediaInput::Dropped(_))
    }
}

/// What the host must do with a drop event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropDisposition {
    /// Suppress the platform default (opening/navigating to the file).
    Consumed,
}

/// Drops are consumed for as long as the wizard is active, whether or not
/// the payload is accepted, so a missed drop zone never navigates away.
pub fn drop_disposition(_input: &MediaInput) -> DropDisposition {
    DropDisposition::Consumed
}

/// Result of one ingestion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The image was read and encoded.
    Accepted(DataUrl),
    /// The declared type is not an image. Silently discarded.
    Rejected { media_type: String },
    /// Reading the file failed. Silently discarded.
    Failed { reason: String },
    /// The selection contained no file.
    Empty,
}

/// Self-contained `data:<media type>;base64,<payload>` representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUrl(String);

impl DataUrl {
    pub fn encode(media_type: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{media_type};base64,{}", STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DataUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .to_ascii_lowercase()
        .starts_with(IMAGE_CATEGORY)
}

/// Guess a media type from the file extension, for hosts that do not
/// receive a declared type.
pub fn guess_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => FALLBACK_MEDIA_TYPE,
    }
}
