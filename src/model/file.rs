//! The file the user picked or dropped.

use crate::config::UploadConfig;
use crate::error::SelectionError;

/// Runtime handle for the browser (or filesystem) object behind a [`FileInfo`].
///
/// The controller only sees the descriptive fields; the runtime keeps the
/// actual blob and looks it up by key when a command needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileKey(pub u64);

/// Descriptive fields of a selected file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub key: FileKey,
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type as reported by the browser (may be empty)
    pub mime_type: String,
}

impl FileInfo {
    pub fn new(key: FileKey, name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    /// Check type and size before anything is sent to the server.
    pub fn validate(&self, config: &UploadConfig) -> Result<(), SelectionError> {
        let mime = self.mime_type.trim().to_ascii_lowercase();
        let is_image = mime
            .strip_prefix(&config.mime_prefix.to_ascii_lowercase())
            .is_some_and(|subtype| !subtype.is_empty());
        if !is_image {
            return Err(SelectionError::NotAnImage {
                mime_type: self.mime_type.clone(),
            });
        }

        if self.size > config.max_file_size {
            return Err(SelectionError::TooLarge {
                size: self.size,
                max_size: config.max_file_size,
            });
        }

        Ok(())
    }
}
