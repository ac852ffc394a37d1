//! What the results panel currently shows.

use super::panel::ToggleWording;
use crate::model::{Classification, Metadata};

/// Content of the results panel after a round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsContent {
    /// At least one prediction
    Predictions(Classification),
    /// The prediction list was empty or missing
    NoResults { metadata: Option<Metadata> },
    /// Classification failed but metadata came back
    Partial { metadata: Metadata },
}

impl ResultsContent {
    /// Build the success content, folding an empty list into `NoResults`.
    pub fn from_classification(classification: Classification) -> Self {
        if classification.predictions.is_empty() {
            ResultsContent::NoResults {
                metadata: classification.metadata,
            }
        } else {
            ResultsContent::Predictions(classification)
        }
    }

    /// Metadata worth showing, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        let metadata = match self {
            ResultsContent::Predictions(c) => c.metadata.as_ref(),
            ResultsContent::NoResults { metadata } => metadata.as_ref(),
            ResultsContent::Partial { metadata } => Some(metadata),
        };
        metadata.filter(|m| !m.is_empty())
    }

    pub fn toggle_wording(&self) -> ToggleWording {
        match self {
            ResultsContent::Predictions(_) => ToggleWording::Detailed,
            ResultsContent::NoResults { .. } | ResultsContent::Partial { .. } => {
                ToggleWording::Image
            }
        }
    }
}
