//! Plain-text rendering of the results for terminal output.

use std::fmt::Write;

use super::metadata::tab_entries;
use super::results::{NO_RESULTS_TEXT, PARTIAL_RESULTS_TEXT};
use crate::state::{MetadataTab, ResultsContent};

/// Render the error banner, results and every non-empty metadata tab.
pub fn text_report(error: Option<&str>, results: Option<&ResultsContent>) -> String {
    let mut out = String::new();

    if let Some(error) = error {
        let _ = writeln!(out, "Error: {error}");
    }

    match results {
        Some(ResultsContent::Predictions(classification)) => {
            if !classification.insights.is_empty() {
                let _ = writeln!(out, "Image Insights");
                for insight in &classification.insights {
                    let _ = writeln!(out, "  {insight}");
                }
                out.push('\n');
            }
            let _ = writeln!(out, "Classification Results");
            let width = classification
                .predictions
                .iter()
                .map(|p| p.label.chars().count())
                .max()
                .unwrap_or(0);
            for prediction in &classification.predictions {
                let _ = writeln!(
                    out,
                    "  {:<width$}  {:>6}%",
                    prediction.label,
                    prediction.percentage()
                );
            }
        }
        Some(ResultsContent::NoResults { .. }) => {
            let _ = writeln!(out, "{NO_RESULTS_TEXT}");
        }
        Some(ResultsContent::Partial { .. }) => {
            let _ = writeln!(out, "{PARTIAL_RESULTS_TEXT}");
        }
        None => {}
    }

    if let Some(metadata) = results.and_then(ResultsContent::metadata) {
        for tab in MetadataTab::ALL {
            let entries = tab_entries(tab, metadata);
            if entries.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n[{}]", tab.title());
            for entry in entries {
                let _ = writeln!(out, "  {}: {}", entry.label(), entry.plain_value());
            }
        }
    }

    out
}
