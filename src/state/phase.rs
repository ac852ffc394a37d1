//! Top-level display state of the page.

use super::submission::RequestId;

/// Mutually exclusive display states.
///
/// Every phase except `Idle` has a selected file; a validation failure always
/// returns to `Idle` and drops the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing selected
    #[default]
    Idle,
    /// A valid file is selected and nothing was submitted yet
    FileSelected,
    /// One request is in flight
    Submitting(RequestId),
    /// Predictions (or the "no results" notice) are shown
    ResultsShown,
    /// The last submission failed and nothing else is shown
    ErrorShown,
    /// Classification failed but metadata is shown
    PartialResults,
}

impl Phase {
    /// Whether the submit control is enabled.
    ///
    /// The file stays selected after a round trip, so finished phases allow
    /// re-submitting; only `Idle` and an in-flight request block it.
    pub fn can_submit(&self) -> bool {
        !matches!(self, Phase::Idle | Phase::Submitting(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Phase::Submitting(_))
    }
}
