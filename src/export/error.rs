use std::fmt::{self, Display};
use std::path::PathBuf;

#[derive(Debug)]
pub enum ExportError {
    /// Writing the destination file failed
    Write { path: PathBuf, reason: String },
    /// Encoding pixels (PNG, JPEG, ...) failed
    Encode(String),
    /// Capturing the notes panel failed
    Snapshot(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Write { path, reason } => {
                write!(f, "Failed to write {}: {}", path.display(), reason)
            }
            ExportError::Encode(reason) => write!(f, "Failed to encode image: {reason}"),
            ExportError::Snapshot(reason) => write!(f, "Failed to capture notes: {reason}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Encode(e.to_string())
    }
}
