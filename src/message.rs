//! Application message and command types for photocheck.
//!
//! Page events become [`Message`]s handled by the controller; side effects the
//! controller wants performed come back out as [`Command`]s for the runtime.

use crate::error::UploadError;
use crate::model::{ClassificationResponse, FileInfo, FileKey};
use crate::state::{MetadataTab, RequestId};
use crate::theme::ThemeChoice;

/// Messages that can be sent to update application state.
#[derive(Debug, Clone)]
pub enum Message {
    // Selection
    /// A file was picked or dropped (first of the list)
    FileChosen(FileInfo),
    /// The picker closed or the drop carried no file
    NoFileChosen,
    /// Data URL for the preview finished loading
    PreviewReady { key: FileKey, data_url: String },
    /// Reading the preview failed
    PreviewFailed { key: FileKey, reason: String },
    /// Upload area clicked
    BrowseRequested,
    /// Drag entered or moved over the upload area
    DragEntered,
    /// Drag left the upload area or was dropped
    DragLeft,

    // Submission
    /// Submit button clicked
    SubmitRequested,
    /// The request finished (or failed)
    UploadFinished {
        request_id: RequestId,
        result: Result<ClassificationResponse, UploadError>,
    },

    // Results
    /// Metadata toggle clicked
    MetadataToggled,
    /// A metadata tab link clicked
    TabSelected(MetadataTab),

    // Chrome
    /// Theme toggle clicked
    ThemeToggled,
    /// Logo clicked
    LogoClicked,
    /// Logo flip animation elapsed
    LogoAnimationDone,
    /// Load animation delay elapsed
    IntroReveal,
    /// Progress bar delay elapsed for the given render
    ProgressReveal { generation: u64 },
    /// The page is being hidden or unloaded
    PageHidden,
}

/// Where a scroll command should bring the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Error container, centered
    Error,
    /// Results container, aligned to the top
    Results,
    /// Metadata dropdown, nearest edge
    MetadataPanel,
}

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the native file picker
    OpenFilePicker,
    /// Reset the file input so the same file can be picked again
    ClearFileInput,
    /// Read the file as a data URL for the preview
    ReadPreview { key: FileKey },
    /// Send the file to the classification endpoint
    Upload { request_id: RequestId, key: FileKey },
    /// Abort an in-flight request
    CancelUpload { request_id: RequestId },
    /// Store the theme preference
    PersistTheme(ThemeChoice),
    /// Smoothly scroll an element into view after a delay
    ScrollIntoView { target: ScrollTarget, delay_ms: u32 },
    /// Deliver a message after a delay
    Schedule { delay_ms: u32, message: ScheduledMessage },
}

/// Messages that can be delivered by a timer.
///
/// Kept separate from [`Message`] so commands stay comparable in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledMessage {
    LogoAnimationDone,
    IntroReveal,
    ProgressReveal { generation: u64 },
}

impl From<ScheduledMessage> for Message {
    fn from(scheduled: ScheduledMessage) -> Self {
        match scheduled {
            ScheduledMessage::LogoAnimationDone => Message::LogoAnimationDone,
            ScheduledMessage::IntroReveal => Message::IntroReveal,
            ScheduledMessage::ProgressReveal { generation } => Message::ProgressReveal { generation },
        }
    }
}
