//! Unit tests for the views.
//!
//! These tests drive the controller with messages and check the markup and
//! patches it produces, without a browser.

mod page_tests;

use photocheck_ui::Application;
use serde_json::Value;

use crate::app::PhotoCheckApp;
use crate::config::AppConfig;
use crate::message::{Command, Message};
use crate::model::{decode_value, FileInfo, FileKey, Metadata};
use crate::theme::ThemeChoice;

/// Metadata from a JSON object literal.
fn metadata(value: Value) -> Metadata {
    serde_json::from_value(value).unwrap()
}

/// A controller with one valid file selected.
fn selected_app() -> PhotoCheckApp {
    let mut app = PhotoCheckApp::new(AppConfig::default(), ThemeChoice::Light, None);
    app.update(Message::FileChosen(FileInfo::new(FileKey(1), "a.jpg", 2048, "image/jpeg")));
    app
}

/// A controller that submitted and received `body`.
fn answered_app(body: Value) -> PhotoCheckApp {
    let mut app = selected_app();
    let commands = app.update(Message::SubmitRequested);
    let Some(Command::Upload { request_id, .. }) = commands.first().cloned() else {
        panic!("expected upload, got {commands:?}");
    };
    app.update(Message::UploadFinished {
        request_id,
        result: decode_value(body),
    });
    app
}
