//! photocheck - upload an image and review its classification
//!
//! A browser controller for a single-page image classification tool: pick or
//! drop an image, preview it, send it to the backend and browse the returned
//! predictions and metadata. The controller ([`PhotoCheckApp`]) is plain Rust
//! and runs the same way in the browser (`wasm32`) and in the
//! `photocheck-native` command-line client.

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod message;
pub mod model;
pub mod state;
pub mod theme;
pub mod upload;
pub mod views;

pub use app::PhotoCheckApp;
pub use config::{AppConfig, LogLevel};
pub use error::{SelectionError, UploadError};
pub use message::{Command, Message};

// Native command-line client
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod wasm_file;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
