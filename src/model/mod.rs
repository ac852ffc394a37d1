//! Data models for the upload-and-review controller.

mod file;
mod metadata;
mod prediction;
mod response;

pub use file::{FileInfo, FileKey};
pub use metadata::{display_value, is_truthy, Metadata};
pub use prediction::{BoundingBox, Prediction};
pub use response::{
    decode_response, decode_value, ApplicationFailure, Classification, ClassificationResponse,
    ResultKind,
};
