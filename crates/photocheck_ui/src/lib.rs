//! photocheck_ui - a small Elm-style controller runtime for page-based web UIs
//!
//! Applications own their state, react to messages with `update`, and describe
//! the page with `view` as a list of [`ElementPatch`]es addressed by element id.
//! The [`Dispatcher`] serializes message handling and hands produced commands to
//! an executor. On `wasm32` the [`dom`] module applies patches to the live page.

mod application;
mod callback;
mod dispatcher;
mod error;
mod node;
mod patch;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use application::Application;
pub use callback::Callback;
pub use dispatcher::{Dispatcher, Surface};
pub use error::DomError;
pub use node::{el, escape_html, text, ElementNode, Node};
pub use patch::{ElementPatch, PatchOp, Target};
