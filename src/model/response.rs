//! Classification response, decoded once at the upload boundary.
//!
//! Accepted shapes:
//! - `{ "predictions": [...], "metadata": {...}, "insights": [...] }`
//! - `[ ...predictions ]` (bare array)
//! - `{ "error": "...", "details": "...", "metadata": {...} }`
//!
//! Everything else is [`UploadError::InvalidFormat`].

use serde_json::Value;

use super::metadata::{display_value, is_truthy, Metadata};
use super::prediction::Prediction;
use crate::error::UploadError;

/// Display variant for a non-empty prediction list.
///
/// Both variants currently render the same way; the distinction is kept so
/// detection results can grow their own presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Classification,
    Detection,
}

/// Successful classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Display order is insertion order
    pub predictions: Vec<Prediction>,
    pub metadata: Option<Metadata>,
    pub insights: Vec<String>,
}

impl Classification {
    pub fn kind(&self) -> ResultKind {
        if self.predictions.iter().any(|p| p.bbox.is_some()) {
            ResultKind::Detection
        } else {
            ResultKind::Classification
        }
    }
}

/// The server reported that classification failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationFailure {
    pub error: String,
    /// Extra diagnostic text, logged but not shown
    pub details: Option<String>,
    /// Metadata extracted before the failure, if any
    pub metadata: Option<Metadata>,
}

/// A decoded response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationResponse {
    Classified(Classification),
    Failed(ApplicationFailure),
}

/// Parse and decode a response body.
pub fn decode_response(body: &str) -> Result<ClassificationResponse, UploadError> {
    let value: Value = serde_json::from_str(body)?;
    decode_value(value)
}

/// Decode an already-parsed response body.
pub fn decode_value(value: Value) -> Result<ClassificationResponse, UploadError> {
    match value {
        Value::Array(entries) => Ok(ClassificationResponse::Classified(Classification {
            predictions: entries.iter().map(Prediction::from_value).collect(),
            metadata: None,
            insights: Vec::new(),
        })),
        Value::Object(mut object) => {
            let metadata = match object.remove("metadata") {
                Some(Value::Object(map)) => Some(Metadata::from(map)),
                _ => None,
            };

            if let Some(error) = object.get("error").filter(|e| is_truthy(e)) {
                let error = match error {
                    Value::String(s) => s.clone(),
                    other => display_value(other).unwrap_or_default(),
                };
                let details = object.get("details").and_then(display_value);
                return Ok(ClassificationResponse::Failed(ApplicationFailure {
                    error,
                    details,
                    metadata,
                }));
            }

            match object.remove("predictions") {
                Some(Value::Array(entries)) => {
                    let insights = match object.remove("insights") {
                        Some(Value::Array(items)) => items.iter().filter_map(display_value).collect(),
                        _ => Vec::new(),
                    };
                    Ok(ClassificationResponse::Classified(Classification {
                        predictions: entries.iter().map(Prediction::from_value).collect(),
                        metadata: metadata.filter(|m| !m.is_empty()),
                        insights,
                    }))
                }
                _ => Err(UploadError::InvalidFormat),
            }
        }
        _ => Err(UploadError::InvalidFormat),
    }
}
