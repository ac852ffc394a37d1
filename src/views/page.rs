//! Whole-page view.
//!
//! [`PageView`] is a snapshot of everything the page shows, computed from the
//! controller state. [`PageView::into_patches`] turns it into element patches
//! for the fixed page skeleton.

use photocheck_ui::{el, text, ElementPatch, Node, PatchOp, Target};

use super::helpers::icon;
use super::metadata::render_tab;
use super::results::{results_content, toggle_label};
use crate::app::PhotoCheckApp;
use crate::constants::ids;
use crate::state::{MetadataPanel, MetadataTab, ResultsContent, ToggleWording};
use crate::theme::ThemeChoice;

const LOGO: &str = ".logo";
const PROGRESS_FILL: &str = ".progress-fill";

/// State of the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub loading: bool,
}

impl SubmitButton {
    pub fn label(&self) -> Node {
        if self.loading {
            Node::Fragment(vec![
                el("span").class("loader").into(),
                text("Analyzing..."),
            ])
        } else {
            Node::Fragment(vec![icon("fas fa-search"), text("Analyze Image")])
        }
    }
}

/// Metadata panel as shown on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataView {
    pub panel: MetadataPanel,
    pub wording: ToggleWording,
    pub active_tab: MetadataTab,
    /// Rendered content per tab, in tab order
    pub tabs: Vec<(MetadataTab, Node)>,
}

/// Everything the page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub theme: ThemeChoice,
    pub intro_shown: bool,
    pub logo_flipping: bool,
    pub today: Option<String>,

    pub drag_active: bool,
    pub file_name: Option<String>,
    pub preview: Option<String>,
    pub submit: SubmitButton,

    pub error: Option<String>,
    pub results: Option<Node>,
    pub progress_revealed: bool,
    /// `None` hides the metadata dropdown
    pub metadata: Option<MetadataView>,
}

impl PageView {
    pub fn build(app: &PhotoCheckApp) -> Self {
        let results = app.results();
        let metadata = results.and_then(|content| {
            let metadata = content.metadata()?;
            Some(MetadataView {
                panel: app.panel(),
                wording: content.toggle_wording(),
                active_tab: app.active_tab(),
                tabs: MetadataTab::ALL
                    .into_iter()
                    .map(|tab| (tab, render_tab(tab, metadata)))
                    .collect(),
            })
        });

        Self {
            theme: app.theme(),
            intro_shown: app.intro_shown(),
            logo_flipping: app.logo_flipping(),
            today: app.today().map(str::to_string),
            drag_active: app.drag_active(),
            file_name: app.file().map(|f| f.name.clone()),
            preview: app.preview().map(str::to_string),
            submit: SubmitButton {
                enabled: app.phase().can_submit(),
                loading: app.phase().is_submitting(),
            },
            error: app.error().map(str::to_string),
            results: results.map(results_content),
            progress_revealed: app.progress_revealed()
                && matches!(results, Some(ResultsContent::Predictions(_))),
            metadata,
        }
    }

    /// Patches for the page skeleton.
    ///
    /// Optional elements are always addressed; surfaces skip the ones the
    /// page does not have.
    pub fn into_patches(self) -> Vec<ElementPatch> {
        let mut patches = Vec::new();

        // Chrome
        patches.push(ElementPatch::new(Target::Body).class("dark-mode", self.theme.is_dark()));
        patches.push(ElementPatch::id(ids::THEME_TOGGLE).html(icon(self.theme.toggle_icon()).render()));
        patches.push(
            ElementPatch::new(Target::Selector(LOGO))
                .class("animate__animated", self.logo_flipping)
                .class("animate__flip", self.logo_flipping),
        );
        if let Some(today) = self.today {
            patches.push(ElementPatch::id(ids::CURRENT_DATE).text(today));
        }

        // Selection
        let has_file = self.file_name.is_some();
        patches.push(
            ElementPatch::id(ids::UPLOAD_AREA)
                .class("dragover", self.drag_active)
                .class("file-selected", has_file)
                .class("animate__animated", self.intro_shown)
                .class("animate__fadeInUp", self.intro_shown),
        );
        if let Some(name) = self.file_name {
            patches.push(ElementPatch::id(ids::FILE_NAME).text(name));
        }
        patches.push(ElementPatch::id(ids::FILE_INFO).display(has_file, "flex"));
        patches.push(
            ElementPatch::id(ids::SUBMIT_BUTTON)
                .disabled(!self.submit.enabled)
                .html(self.submit.label().render()),
        );
        let has_preview = self.preview.is_some();
        if let Some(src) = self.preview {
            patches.push(ElementPatch::id(ids::IMAGE_PREVIEW).attr("src", src));
        }
        patches.push(
            ElementPatch::id(ids::PREVIEW_CONTAINER)
                .display(has_preview, "block")
                .class("animate__fadeIn", has_preview),
        );

        // Feedback
        let has_error = self.error.is_some();
        if let Some(message) = self.error {
            patches.push(ElementPatch::id(ids::ERROR_MESSAGE).text(message));
        }
        patches.push(ElementPatch::id(ids::ERROR_CONTAINER).display(has_error, "block"));

        let has_results = self.results.is_some();
        if let Some(content) = self.results {
            patches.push(ElementPatch::id(ids::RESULTS_CONTENT).html(content.render()));
        }
        patches.push(
            ElementPatch::id(ids::RESULTS_CONTAINER)
                .display(has_results, "block")
                .class("animate__fadeInUp", has_results),
        );
        if self.progress_revealed {
            patches.push(ElementPatch::new(Target::All(PROGRESS_FILL)).op(PatchOp::StyleFromData {
                property: "width",
                key: "score",
                suffix: "%",
            }));
        }

        // Metadata
        match self.metadata {
            Some(view) => {
                let open = view.panel.is_open();
                patches.push(
                    ElementPatch::id(ids::METADATA_TOGGLE)
                        .html(toggle_label(view.wording, view.panel).render())
                        .class("open", open),
                );
                patches.push(
                    ElementPatch::id(ids::METADATA_DROPDOWN)
                        .display(true, "block")
                        .class("open", open)
                        .class("closed", !open),
                );
                for (tab, content) in view.tabs {
                    let active = tab == view.active_tab;
                    patches.push(ElementPatch::id(tab.content_id()).html(content.render()));
                    patches.push(ElementPatch::new(Target::Selector(tab.link_selector())).class("active", active));
                    patches.push(ElementPatch::id(tab.panel_id()).class("active", active));
                }
            }
            None => patches.push(
                ElementPatch::id(ids::METADATA_DROPDOWN)
                    .display(false, "block")
                    .class("open", false)
                    .class("closed", true),
            ),
        }

        patches
    }
}
