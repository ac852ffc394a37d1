//! Error types for DOM access.

use thiserror::Error;

/// Errors raised while mounting onto or talking to the page.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    /// The global `window` or `document` is not available
    #[error("No {0} object available")]
    NoGlobal(&'static str),

    /// A required element id is missing from the page
    #[error("Required element #{0} not found")]
    MissingElement(String),

    /// An element exists but is not of the expected type
    #[error("Element #{id} is not a {expected}")]
    WrongElementType {
        /// Element id that was looked up
        id: String,
        /// Expected element interface
        expected: &'static str,
    },

    /// A JavaScript exception surfaced through a binding
    #[error("JavaScript error: {0}")]
    Js(String),
}
