//! View modules for photocheck.
//!
//! - page: the whole page as element patches
//! - results: the results panel (predictions, notices, metadata toggle)
//! - metadata: the five metadata tabs
//! - text: plain-text report for the command line
//! - helpers: common markup helpers

mod helpers;
mod metadata;
mod page;
mod results;
mod text;

#[cfg(test)]
mod tests;

pub use metadata::{render_tab, tab_entries, MetadataEntry};
pub use page::{MetadataView, PageView, SubmitButton};
pub use results::{results_content, toggle_label, NO_RESULTS_TEXT, PARTIAL_RESULTS_TEXT};
pub use text::text_report;
