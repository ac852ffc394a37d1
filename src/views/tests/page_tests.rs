//! Tests for the page patches.

use photocheck_ui::{Application, ElementPatch, PatchOp, Target};
use serde_json::json;

use super::{answered_app, selected_app};
use crate::app::PhotoCheckApp;
use crate::config::AppConfig;
use crate::constants::ids;
use crate::message::Message;
use crate::model::{FileInfo, FileKey};
use crate::state::MetadataTab;
use crate::theme::ThemeChoice;

fn patch_for(patches: &[ElementPatch], target: Target) -> &ElementPatch {
    patches
        .iter()
        .find(|p| p.target == target)
        .unwrap_or_else(|| panic!("no patch for {target:?}"))
}

fn display(patches: &[ElementPatch], id: &'static str) -> &'static str {
    match patch_for(patches, Target::Id(id)).find("display") {
        Some(PatchOp::Display(value)) => *value,
        other => panic!("no display op for {id}: {other:?}"),
    }
}

fn class(patches: &[ElementPatch], target: Target, name: &'static str) -> bool {
    match patch_for(patches, target).find(&format!("class:{name}")) {
        Some(PatchOp::Class(_, on)) => *on,
        other => panic!("no class op {name}: {other:?}"),
    }
}

fn html(patches: &[ElementPatch], id: &'static str) -> String {
    match patch_for(patches, Target::Id(id)).find("html") {
        Some(PatchOp::InnerHtml(markup)) => markup.clone(),
        other => panic!("no html op for {id}: {other:?}"),
    }
}

fn has_target(patches: &[ElementPatch], target: Target) -> bool {
    patches.iter().any(|p| p.target == target)
}

#[test]
fn test_idle_page() {
    let app = PhotoCheckApp::new(AppConfig::default(), ThemeChoice::Light, Some("2026-10-19".into()));
    let patches = app.view();

    assert_eq!(display(&patches, ids::FILE_INFO), "none");
    assert_eq!(display(&patches, ids::PREVIEW_CONTAINER), "none");
    assert_eq!(display(&patches, ids::ERROR_CONTAINER), "none");
    assert_eq!(display(&patches, ids::RESULTS_CONTAINER), "none");
    assert_eq!(display(&patches, ids::METADATA_DROPDOWN), "none");
    assert_eq!(
        patch_for(&patches, Target::Id(ids::SUBMIT_BUTTON)).find("disabled"),
        Some(&PatchOp::Disabled(true))
    );
    assert_eq!(
        html(&patches, ids::SUBMIT_BUTTON),
        r#"<i class="fas fa-search"></i>Analyze Image"#
    );
    assert_eq!(
        patch_for(&patches, Target::Id(ids::CURRENT_DATE)).find("text"),
        Some(&PatchOp::Text("2026-10-19".into()))
    );
    assert!(!class(&patches, Target::Id(ids::UPLOAD_AREA), "file-selected"));
    assert!(!class(&patches, Target::Body, "dark-mode"));
    assert_eq!(html(&patches, ids::THEME_TOGGLE), r#"<i class="fas fa-moon"></i>"#);
}

#[test]
fn test_selected_file_page() {
    let mut app = selected_app();
    app.update(Message::PreviewReady {
        key: FileKey(1),
        data_url: "data:image/jpeg;base64,AAAA".into(),
    });
    let patches = app.view();

    assert_eq!(display(&patches, ids::FILE_INFO), "flex");
    assert_eq!(
        patch_for(&patches, Target::Id(ids::FILE_NAME)).find("text"),
        Some(&PatchOp::Text("a.jpg".into()))
    );
    assert!(class(&patches, Target::Id(ids::UPLOAD_AREA), "file-selected"));
    assert_eq!(display(&patches, ids::PREVIEW_CONTAINER), "block");
    assert_eq!(
        patch_for(&patches, Target::Id(ids::IMAGE_PREVIEW)).find("attr:src"),
        Some(&PatchOp::Attr("src", "data:image/jpeg;base64,AAAA".into()))
    );
    assert_eq!(
        patch_for(&patches, Target::Id(ids::SUBMIT_BUTTON)).find("disabled"),
        Some(&PatchOp::Disabled(false))
    );
}

#[test]
fn test_submitting_disables_and_shows_loader() {
    let mut app = selected_app();
    app.update(Message::SubmitRequested);
    let patches = app.view();

    assert_eq!(
        patch_for(&patches, Target::Id(ids::SUBMIT_BUTTON)).find("disabled"),
        Some(&PatchOp::Disabled(true))
    );
    assert_eq!(
        html(&patches, ids::SUBMIT_BUTTON),
        r#"<span class="loader"></span>Analyzing..."#
    );
    assert_eq!(display(&patches, ids::RESULTS_CONTAINER), "none");
    assert_eq!(display(&patches, ids::ERROR_CONTAINER), "none");
}

#[test]
fn test_rejected_file_shows_error_and_resets() {
    let mut app = selected_app();
    app.update(Message::FileChosen(FileInfo::new(FileKey(2), "doc.pdf", 10, "application/pdf")));
    let patches = app.view();

    assert_eq!(display(&patches, ids::ERROR_CONTAINER), "block");
    assert_eq!(
        patch_for(&patches, Target::Id(ids::ERROR_MESSAGE)).find("text"),
        Some(&PatchOp::Text("Please select an image file".into()))
    );
    assert_eq!(display(&patches, ids::FILE_INFO), "none");
    assert_eq!(display(&patches, ids::PREVIEW_CONTAINER), "none");
    assert!(!class(&patches, Target::Id(ids::UPLOAD_AREA), "file-selected"));
}

#[test]
fn test_success_page_with_basic_tab() {
    let app = answered_app(json!({
        "predictions": [{ "label": "cat", "score": 0.97 }],
        "metadata": { "filename": "a.jpg" }
    }));
    let patches = app.view();

    assert_eq!(display(&patches, ids::RESULTS_CONTAINER), "block");
    assert_eq!(display(&patches, ids::ERROR_CONTAINER), "none");
    assert!(html(&patches, ids::RESULTS_CONTENT).contains(r#"<div class="result-score">97.00%</div>"#));
    assert_eq!(display(&patches, ids::METADATA_DROPDOWN), "block");
    assert!(class(&patches, Target::Id(ids::METADATA_DROPDOWN), "closed"));

    let basic = html(&patches, MetadataTab::Basic.content_id());
    assert!(basic.contains("File Name"));
    assert!(basic.contains("a.jpg"));
    assert!(class(&patches, Target::Id("tab-basic"), "active"));
    assert!(!class(&patches, Target::Id("tab-exif"), "active"));
    assert_eq!(
        html(&patches, MetadataTab::Camera.content_id()),
        "<p>No camera information available in EXIF data.</p>"
    );
}

#[test]
fn test_progress_bars_fill_after_reveal() {
    let mut app = answered_app(json!([{ "label": "cat", "score": 0.97 }]));
    let fill = Target::All(".progress-fill");
    assert!(!has_target(&app.view(), fill.clone()));

    let generation = app.generation();
    app.update(Message::ProgressReveal { generation });
    let patches = app.view();
    assert_eq!(
        patch_for(&patches, fill).ops,
        vec![PatchOp::StyleFromData {
            property: "width",
            key: "score",
            suffix: "%",
        }]
    );
}

#[test]
fn test_error_without_metadata_shows_only_error() {
    let app = answered_app(json!({ "error": "model unavailable" }));
    let patches = app.view();

    assert_eq!(display(&patches, ids::ERROR_CONTAINER), "block");
    assert_eq!(
        patch_for(&patches, Target::Id(ids::ERROR_MESSAGE)).find("text"),
        Some(&PatchOp::Text("model unavailable".into()))
    );
    assert_eq!(display(&patches, ids::RESULTS_CONTAINER), "none");
    assert!(!has_target(&patches, Target::Id(ids::RESULTS_CONTENT)));
    assert!(!has_target(&patches, Target::Id(ids::METADATA_TOGGLE)));
    assert_eq!(display(&patches, ids::METADATA_DROPDOWN), "none");
}

#[test]
fn test_error_with_metadata_shows_toggle_and_basic_tab() {
    let app = answered_app(json!({ "error": "model unavailable", "metadata": { "filename": "a.jpg" } }));
    let patches = app.view();

    assert_eq!(display(&patches, ids::ERROR_CONTAINER), "block");
    assert_eq!(display(&patches, ids::RESULTS_CONTAINER), "block");
    assert!(html(&patches, ids::RESULTS_CONTENT).contains(r#"id="metadata-toggle""#));
    let basic = html(&patches, MetadataTab::Basic.content_id());
    assert!(basic.contains("File Name"));
    assert!(basic.contains("a.jpg"));
}

#[test]
fn test_toggle_twice_restores_closed_state() {
    let mut app = answered_app(json!({ "predictions": [], "metadata": { "filename": "a.jpg" } }));
    let before = app.view();
    let toggle = Target::Id(ids::METADATA_TOGGLE);

    app.update(Message::MetadataToggled);
    let opened = app.view();
    assert!(class(&opened, toggle.clone(), "open"));
    assert!(class(&opened, Target::Id(ids::METADATA_DROPDOWN), "open"));
    assert!(html(&opened, ids::METADATA_TOGGLE).contains("Hide Image Information"));

    app.update(Message::MetadataToggled);
    let closed = app.view();
    assert_eq!(patch_for(&closed, toggle.clone()), patch_for(&before, toggle));
    assert_eq!(
        patch_for(&closed, Target::Id(ids::METADATA_DROPDOWN)),
        patch_for(&before, Target::Id(ids::METADATA_DROPDOWN))
    );
    // The result list is not rebuilt by toggling.
    assert_eq!(html(&closed, ids::RESULTS_CONTENT), html(&before, ids::RESULTS_CONTENT));
}

#[test]
fn test_new_file_hides_previous_results() {
    let mut app = answered_app(json!({
        "predictions": [{ "label": "cat", "score": 0.97 }],
        "metadata": { "filename": "a.jpg" }
    }));
    app.update(Message::MetadataToggled);
    app.update(Message::FileChosen(FileInfo::new(FileKey(5), "b.png", 10, "image/png")));
    let patches = app.view();

    assert_eq!(display(&patches, ids::RESULTS_CONTAINER), "none");
    assert_eq!(display(&patches, ids::ERROR_CONTAINER), "none");
    assert_eq!(display(&patches, ids::METADATA_DROPDOWN), "none");
    assert!(class(&patches, Target::Id(ids::METADATA_DROPDOWN), "closed"));
}

#[test]
fn test_tab_selection() {
    let mut app = answered_app(json!({ "predictions": [], "metadata": { "exif": { "Make": "Acme" } } }));
    app.update(Message::TabSelected(MetadataTab::Exif));
    let patches = app.view();

    assert!(class(&patches, Target::Id("tab-exif"), "active"));
    assert!(!class(&patches, Target::Id("tab-basic"), "active"));
    assert!(class(
        &patches,
        Target::Selector(MetadataTab::Exif.link_selector()),
        "active"
    ));
}

#[test]
fn test_dark_theme_and_logo() {
    let mut app = PhotoCheckApp::new(AppConfig::default(), ThemeChoice::Dark, None);
    app.update(Message::LogoClicked);
    app.update(Message::IntroReveal);
    let patches = app.view();

    assert!(class(&patches, Target::Body, "dark-mode"));
    assert_eq!(html(&patches, ids::THEME_TOGGLE), r#"<i class="fas fa-sun"></i>"#);
    assert!(class(&patches, Target::Selector(".logo"), "animate__flip"));
    assert!(class(&patches, Target::Id(ids::UPLOAD_AREA), "animate__fadeInUp"));
    assert!(!has_target(&patches, Target::Id(ids::CURRENT_DATE)));
}
