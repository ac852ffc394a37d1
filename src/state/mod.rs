//! Explicit UI state owned by the controller.

mod panel;
mod phase;
mod results;
mod submission;

pub use panel::{MetadataPanel, MetadataTab, ToggleWording};
pub use phase::Phase;
pub use results::ResultsContent;
pub use submission::{RequestId, Submission};
