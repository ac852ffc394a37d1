//! Error types for file selection and upload.

use thiserror::Error;

use crate::constants::MIB;

/// Errors reported locally when a file is picked or dropped. Never sent to the server.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// MIME type is not an image type
    #[error("Please select an image file")]
    NotAnImage {
        /// The MIME type the browser reported (may be empty)
        mime_type: String,
    },

    /// File exceeds the upload size cap
    #[error("File too large. Maximum size is {}MB.", .max_size / MIB)]
    TooLarge {
        /// Size of the rejected file in bytes
        size: u64,
        /// Configured maximum in bytes
        max_size: u64,
    },

    /// Submit was requested with nothing selected
    #[error("Please select an image first")]
    NoFile,
}

/// Errors from one upload round trip.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    /// Non-success status without a usable error body
    #[error("HTTP error! Status: {status}")]
    Http {
        /// HTTP status code returned by the server
        status: u16,
    },

    /// The request never produced a response
    #[error("{0}")]
    Network(String),

    /// Response body is not valid JSON
    #[error("{0}")]
    Json(String),

    /// JSON matches none of the accepted response shapes
    #[error("Invalid response format from server")]
    InvalidFormat,

    /// The request was aborted before completing
    #[error("Request cancelled")]
    Cancelled,
}

impl UploadError {
    /// Text shown in the error banner.
    ///
    /// Transport failures get a generic sentence wrapped around the underlying
    /// error; shape errors are shown as they are.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::InvalidFormat | UploadError::Cancelled => self.to_string(),
            _ => {
                let detail = self.to_string();
                let mut message = String::from("An error occurred while processing your request.");
                if !detail.is_empty() {
                    message.push(' ');
                    message.push_str(&detail);
                }
                message.push_str(" Please check your API key and try again.");
                message
            }
        }
    }
}

impl From<serde_json::Error> for UploadError {
    fn from(e: serde_json::Error) -> Self {
        UploadError::Json(e.to_string())
    }
}
