//! photocheck controller - upload, classify and review a single image
//!
//! [`PhotoCheckApp`] owns every piece of UI state. Page events arrive as
//! [`Message`]s, `update` mutates state and returns [`Command`]s for the
//! runtime, and `view` describes the page as element patches. Nothing in here
//! touches the browser, so the whole flow is unit-tested natively.

use photocheck_ui::{Application, ElementPatch};

use crate::config::AppConfig;
use crate::error::{SelectionError, UploadError};
use crate::message::{Command, Message, ScheduledMessage, ScrollTarget};
use crate::model::{ClassificationResponse, FileInfo, FileKey};
use crate::state::{
    MetadataPanel, MetadataTab, Phase, RequestId, ResultsContent, Submission,
};
use crate::theme::ThemeChoice;
use crate::views::PageView;

/// The upload-and-review controller.
pub struct PhotoCheckApp {
    config: AppConfig,

    // Selection
    phase: Phase,
    file: Option<FileInfo>,
    preview: Option<String>,
    drag_active: bool,

    // Feedback
    error: Option<String>,
    results: Option<ResultsContent>,
    panel: MetadataPanel,
    active_tab: MetadataTab,

    // Submission
    in_flight: Option<Submission>,
    next_request: u64,
    /// Bumped for every rendered result set; gates the progress reveal timer
    generation: u64,
    progress_revealed: bool,

    // Chrome
    theme: ThemeChoice,
    logo_flipping: bool,
    intro_shown: bool,
    today: Option<String>,
}

impl PhotoCheckApp {
    /// Create the controller with an initial theme and the date to display.
    pub fn new(config: AppConfig, theme: ThemeChoice, today: Option<String>) -> Self {
        log::info!("{} controller created (theme: {})", config.app_name, theme);
        Self {
            config,
            phase: Phase::Idle,
            file: None,
            preview: None,
            drag_active: false,
            error: None,
            results: None,
            panel: MetadataPanel::Closed,
            active_tab: MetadataTab::Basic,
            in_flight: None,
            next_request: 1,
            generation: 0,
            progress_revealed: false,
            theme,
            logo_flipping: false,
            intro_shown: false,
            today,
        }
    }

    /// Commands to run once the page is mounted.
    pub fn startup_commands(&self) -> Vec<Command> {
        vec![Command::Schedule {
            delay_ms: self.config.timing.intro_delay_ms,
            message: ScheduledMessage::IntroReveal,
        }]
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn file(&self) -> Option<&FileInfo> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results(&self) -> Option<&ResultsContent> {
        self.results.as_ref()
    }

    pub fn panel(&self) -> MetadataPanel {
        self.panel
    }

    pub fn active_tab(&self) -> MetadataTab {
        self.active_tab
    }

    pub fn in_flight(&self) -> Option<&Submission> {
        self.in_flight.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn progress_revealed(&self) -> bool {
        self.progress_revealed
    }

    pub fn theme(&self) -> ThemeChoice {
        self.theme
    }

    pub fn logo_flipping(&self) -> bool {
        self.logo_flipping
    }

    pub fn intro_shown(&self) -> bool {
        self.intro_shown
    }

    pub fn today(&self) -> Option<&str> {
        self.today.as_deref()
    }

    /// Describe the whole page for the current state.
    pub fn page(&self) -> PageView {
        PageView::build(self)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    fn handle_file_chosen(&mut self, info: FileInfo) -> Vec<Command> {
        let mut commands = self.cancel_in_flight();

        if let Err(e) = info.validate(&self.config.upload) {
            log::warn!("Rejected {:?} ({} bytes, {:?}): {}", info.name, info.size, info.mime_type, e);
            self.reset_selection();
            commands.push(Command::ClearFileInput);
            commands.extend(self.show_error(e.to_string()));
            return commands;
        }

        log::info!("Selected {:?} ({} bytes, {})", info.name, info.size, info.mime_type);
        let key = info.key;
        self.file = Some(info);
        self.preview = None;
        self.error = None;
        self.results = None;
        self.panel = MetadataPanel::Closed;
        self.active_tab = MetadataTab::Basic;
        self.phase = Phase::FileSelected;

        commands.push(Command::ReadPreview { key });
        commands
    }

    /// Back to `Idle`: drop the file and everything derived from it.
    /// The error banner is left to the caller.
    fn reset_selection(&mut self) {
        self.file = None;
        self.preview = None;
        self.results = None;
        self.panel = MetadataPanel::Closed;
        self.phase = Phase::Idle;
    }

    fn is_current_file(&self, key: FileKey) -> bool {
        self.file.as_ref().is_some_and(|f| f.key == key)
    }

    // ========================================================================
    // Submission
    // ========================================================================

    fn handle_submit(&mut self) -> Vec<Command> {
        let Some(file) = &self.file else {
            log::debug!("Submit requested without a file");
            return self.show_error(SelectionError::NoFile.to_string());
        };
        if !self.phase.can_submit() {
            log::debug!("Submit ignored in phase {:?}", self.phase);
            return Vec::new();
        }

        let request_id = RequestId(self.next_request);
        self.next_request += 1;
        let key = file.key;
        log::info!("Submitting {:?} as request {}", file.name, request_id.0);

        self.in_flight = Some(Submission::new(request_id, key));
        self.phase = Phase::Submitting(request_id);
        self.error = None;
        self.results = None;
        self.panel = MetadataPanel::Closed;

        vec![Command::Upload { request_id, key }]
    }

    fn handle_upload_finished(
        &mut self,
        request_id: RequestId,
        result: Result<ClassificationResponse, UploadError>,
    ) -> Vec<Command> {
        let Some(submission) = self.in_flight.take_if(|s| s.request_id == request_id) else {
            log::debug!("Discarding stale completion for request {}", request_id.0);
            return Vec::new();
        };
        log::info!(
            "Request {} for file {} finished in {:.2}s",
            request_id.0,
            submission.file_key.0,
            submission.elapsed().as_secs_f64()
        );

        match result {
            Err(UploadError::Cancelled) => {
                log::info!("Request {} was cancelled", request_id.0);
                self.phase = Phase::FileSelected;
                Vec::new()
            }
            Err(e) => {
                log::error!("Upload failed: {}", e);
                self.phase = Phase::ErrorShown;
                self.show_error(e.user_message())
            }
            Ok(ClassificationResponse::Failed(failure)) => {
                if let Some(details) = &failure.details {
                    log::warn!("Classification failed: {} ({})", failure.error, details);
                } else {
                    log::warn!("Classification failed: {}", failure.error);
                }
                let partial = failure.metadata.is_some();
                match failure.metadata {
                    Some(metadata) => {
                        self.results = Some(ResultsContent::Partial { metadata });
                        self.phase = Phase::PartialResults;
                    }
                    None => self.phase = Phase::ErrorShown,
                }
                let mut commands = self.show_error(failure.error);
                if partial {
                    commands.push(Command::ScrollIntoView {
                        target: ScrollTarget::Results,
                        delay_ms: self.config.timing.scroll_delay_ms,
                    });
                }
                commands
            }
            Ok(ClassificationResponse::Classified(classification)) => {
                log::info!(
                    "Received {} prediction(s) ({:?})",
                    classification.predictions.len(),
                    classification.kind()
                );
                let content = ResultsContent::from_classification(classification);
                let has_predictions = matches!(content, ResultsContent::Predictions(_));
                self.results = Some(content);
                self.phase = Phase::ResultsShown;
                self.generation += 1;
                self.progress_revealed = false;

                if !has_predictions {
                    return Vec::new();
                }
                let timing = &self.config.timing;
                vec![
                    Command::Schedule {
                        delay_ms: timing.progress_reveal_ms,
                        message: ScheduledMessage::ProgressReveal {
                            generation: self.generation,
                        },
                    },
                    Command::ScrollIntoView {
                        target: ScrollTarget::Results,
                        delay_ms: timing.scroll_delay_ms,
                    },
                ]
            }
        }
    }

    /// Abort the current request, if any. The phase is left to the caller.
    fn cancel_in_flight(&mut self) -> Vec<Command> {
        match self.in_flight.take() {
            Some(submission) => {
                log::info!("Cancelling request {}", submission.request_id.0);
                vec![Command::CancelUpload {
                    request_id: submission.request_id,
                }]
            }
            None => Vec::new(),
        }
    }

    fn show_error(&mut self, message: String) -> Vec<Command> {
        self.error = Some(message);
        vec![Command::ScrollIntoView {
            target: ScrollTarget::Error,
            delay_ms: 0,
        }]
    }

    // ========================================================================
    // Results
    // ========================================================================

    fn handle_metadata_toggled(&mut self) -> Vec<Command> {
        if self.results.as_ref().and_then(ResultsContent::metadata).is_none() {
            log::debug!("Metadata toggle ignored: no metadata shown");
            return Vec::new();
        }
        self.panel = self.panel.toggled();
        log::debug!("Metadata panel {:?}", self.panel);

        if self.panel.is_open() {
            vec![Command::ScrollIntoView {
                target: ScrollTarget::MetadataPanel,
                delay_ms: self.config.timing.scroll_delay_ms,
            }]
        } else {
            Vec::new()
        }
    }
}

impl Application for PhotoCheckApp {
    type Message = Message;
    type Command = Command;

    fn update(&mut self, message: Message) -> Vec<Command> {
        match message {
            Message::FileChosen(info) => self.handle_file_chosen(info),
            Message::NoFileChosen => {
                log::debug!("No file chosen; keeping current selection");
                Vec::new()
            }
            Message::PreviewReady { key, data_url } => {
                if self.is_current_file(key) {
                    self.preview = Some(data_url);
                } else {
                    log::debug!("Dropping preview for replaced file {:?}", key);
                }
                Vec::new()
            }
            Message::PreviewFailed { key, reason } => {
                if self.is_current_file(key) {
                    log::warn!("Preview failed: {}", reason);
                    self.preview = None;
                }
                Vec::new()
            }
            Message::BrowseRequested => vec![Command::OpenFilePicker],
            Message::DragEntered => {
                self.drag_active = true;
                Vec::new()
            }
            Message::DragLeft => {
                self.drag_active = false;
                Vec::new()
            }
            Message::SubmitRequested => self.handle_submit(),
            Message::UploadFinished { request_id, result } => {
                self.handle_upload_finished(request_id, result)
            }
            Message::MetadataToggled => self.handle_metadata_toggled(),
            Message::TabSelected(tab) => {
                self.active_tab = tab;
                Vec::new()
            }
            Message::ThemeToggled => {
                self.theme = self.theme.toggled();
                log::info!("Theme switched to {}", self.theme);
                vec![Command::PersistTheme(self.theme)]
            }
            Message::LogoClicked => {
                if self.logo_flipping {
                    return Vec::new();
                }
                self.logo_flipping = true;
                vec![Command::Schedule {
                    delay_ms: self.config.timing.logo_flip_ms,
                    message: ScheduledMessage::LogoAnimationDone,
                }]
            }
            Message::LogoAnimationDone => {
                self.logo_flipping = false;
                Vec::new()
            }
            Message::IntroReveal => {
                self.intro_shown = true;
                Vec::new()
            }
            Message::ProgressReveal { generation } => {
                if generation == self.generation {
                    self.progress_revealed = true;
                }
                Vec::new()
            }
            Message::PageHidden => {
                let commands = self.cancel_in_flight();
                if self.phase.is_submitting() {
                    self.phase = Phase::FileSelected;
                }
                commands
            }
        }
    }

    fn view(&self) -> Vec<ElementPatch> {
        self.page().into_patches()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_SCROLL_DELAY_MS, MIB};
    use crate::model::{decode_value, Classification, Prediction};
    use serde_json::json;

    fn app() -> PhotoCheckApp {
        PhotoCheckApp::new(AppConfig::default(), ThemeChoice::Light, Some("2026-10-19".into()))
    }

    fn image(key: u64) -> FileInfo {
        FileInfo::new(FileKey(key), "a.jpg", 1024, "image/jpeg")
    }

    fn selected() -> PhotoCheckApp {
        let mut app = app();
        app.update(Message::FileChosen(image(1)));
        app
    }

    fn submitted() -> (PhotoCheckApp, RequestId) {
        let mut app = selected();
        let commands = app.update(Message::SubmitRequested);
        let Some(Command::Upload { request_id, .. }) = commands.first() else {
            panic!("expected upload command, got {commands:?}");
        };
        let request_id = *request_id;
        (app, request_id)
    }

    fn respond(app: &mut PhotoCheckApp, request_id: RequestId, body: serde_json::Value) -> Vec<Command> {
        app.update(Message::UploadFinished {
            request_id,
            result: decode_value(body),
        })
    }

    #[test]
    fn test_valid_file_selects_and_reads_preview() {
        let mut app = app();
        let commands = app.update(Message::FileChosen(image(7)));

        assert_eq!(app.phase(), Phase::FileSelected);
        assert!(app.phase().can_submit());
        assert_eq!(commands, vec![Command::ReadPreview { key: FileKey(7) }]);

        app.update(Message::PreviewReady {
            key: FileKey(7),
            data_url: "data:image/jpeg;base64,AAAA".into(),
        });
        assert_eq!(app.preview(), Some("data:image/jpeg;base64,AAAA"));
    }

    #[test]
    fn test_non_image_rejected_back_to_idle() {
        let mut app = selected();
        let commands = app.update(Message::FileChosen(FileInfo::new(
            FileKey(2),
            "notes.txt",
            10,
            "text/plain",
        )));

        assert_eq!(app.phase(), Phase::Idle);
        assert!(app.file().is_none());
        assert!(app.preview().is_none());
        assert_eq!(app.error(), Some("Please select an image file"));
        assert!(commands.contains(&Command::ClearFileInput));
        assert!(!app.phase().can_submit());
    }

    #[test]
    fn test_oversized_file_rejected_with_size_message() {
        let mut app = app();
        app.update(Message::FileChosen(FileInfo::new(
            FileKey(1),
            "huge.png",
            16 * MIB + 1,
            "image/png",
        )));

        assert_eq!(app.phase(), Phase::Idle);
        assert_eq!(app.error(), Some("File too large. Maximum size is 16MB."));

        // Exactly at the limit is fine.
        app.update(Message::FileChosen(FileInfo::new(FileKey(2), "max.png", 16 * MIB, "image/png")));
        assert_eq!(app.phase(), Phase::FileSelected);
        assert!(app.error().is_none());
    }

    #[test]
    fn test_new_file_clears_results_error_and_panel() {
        let (mut app, id) = submitted();
        respond(
            &mut app,
            id,
            json!({ "predictions": [{ "label": "cat", "score": 0.97 }], "metadata": { "filename": "a.jpg" } }),
        );
        app.update(Message::MetadataToggled);
        app.update(Message::TabSelected(MetadataTab::Exif));
        assert!(app.panel().is_open());

        app.update(Message::FileChosen(image(2)));
        assert_eq!(app.phase(), Phase::FileSelected);
        assert!(app.results().is_none());
        assert!(app.error().is_none());
        assert_eq!(app.panel(), MetadataPanel::Closed);
        assert_eq!(app.active_tab(), MetadataTab::Basic);
    }

    #[test]
    fn test_submit_requires_file() {
        let mut app = app();
        let commands = app.update(Message::SubmitRequested);
        assert!(!commands.iter().any(|c| matches!(c, Command::Upload { .. })));
        assert_eq!(app.error(), Some("Please select an image first"));
        assert_eq!(app.phase(), Phase::Idle);
    }

    #[test]
    fn test_submit_disables_until_finished() {
        let (mut app, id) = submitted();
        assert_eq!(app.phase(), Phase::Submitting(id));
        assert!(!app.phase().can_submit());

        // A second click while in flight does nothing.
        assert!(app.update(Message::SubmitRequested).is_empty());

        respond(&mut app, id, json!({ "predictions": [] }));
        assert!(app.phase().can_submit());
    }

    #[test]
    fn test_submit_hides_previous_error_and_results() {
        let (mut app, id) = submitted();
        respond(&mut app, id, json!({ "error": "model unavailable" }));
        assert!(app.error().is_some());

        app.update(Message::SubmitRequested);
        assert!(app.error().is_none());
        assert!(app.results().is_none());
    }

    #[test]
    fn test_success_renders_predictions_and_schedules_reveal() {
        let (mut app, id) = submitted();
        let commands = respond(
            &mut app,
            id,
            json!({ "predictions": [{ "label": "cat", "score": 0.97 }], "metadata": { "filename": "a.jpg" } }),
        );

        assert_eq!(app.phase(), Phase::ResultsShown);
        let Some(ResultsContent::Predictions(c)) = app.results() else {
            panic!("expected predictions");
        };
        assert_eq!(c.predictions, vec![Prediction::new("cat", 0.97)]);
        assert!(commands.contains(&Command::Schedule {
            delay_ms: 300,
            message: ScheduledMessage::ProgressReveal { generation: 1 },
        }));
        assert!(commands.contains(&Command::ScrollIntoView {
            target: ScrollTarget::Results,
            delay_ms: 200,
        }));

        assert!(!app.progress_revealed());
        app.update(Message::ProgressReveal { generation: 1 });
        assert!(app.progress_revealed());
    }

    #[test]
    fn test_stale_progress_reveal_ignored() {
        let (mut app, id) = submitted();
        respond(&mut app, id, json!([{ "label": "cat", "score": 0.5 }]));
        let commands = app.update(Message::SubmitRequested);
        let Some(Command::Upload { request_id, .. }) = commands.first() else {
            panic!("expected upload");
        };
        respond(&mut app, *request_id, json!([{ "label": "dog", "score": 0.5 }]));

        app.update(Message::ProgressReveal { generation: 1 });
        assert!(!app.progress_revealed());
        app.update(Message::ProgressReveal { generation: 2 });
        assert!(app.progress_revealed());
    }

    #[test]
    fn test_application_error_without_metadata() {
        let (mut app, id) = submitted();
        let commands = respond(&mut app, id, json!({ "error": "model unavailable" }));

        assert_eq!(app.phase(), Phase::ErrorShown);
        assert_eq!(app.error(), Some("model unavailable"));
        assert!(app.results().is_none());
        assert_eq!(
            commands,
            vec![Command::ScrollIntoView {
                target: ScrollTarget::Error,
                delay_ms: 0,
            }]
        );

        // No metadata means no toggle to click.
        assert!(app.update(Message::MetadataToggled).is_empty());
        assert_eq!(app.panel(), MetadataPanel::Closed);
    }

    #[test]
    fn test_application_error_with_metadata_is_partial() {
        let (mut app, id) = submitted();
        let commands = respond(
            &mut app,
            id,
            json!({ "error": "model unavailable", "metadata": { "filename": "a.jpg" } }),
        );

        assert_eq!(
            commands,
            vec![
                Command::ScrollIntoView {
                    target: ScrollTarget::Error,
                    delay_ms: 0,
                },
                Command::ScrollIntoView {
                    target: ScrollTarget::Results,
                    delay_ms: DEFAULT_SCROLL_DELAY_MS,
                },
            ]
        );
        assert_eq!(app.phase(), Phase::PartialResults);
        assert_eq!(app.error(), Some("model unavailable"));
        let metadata = app.results().and_then(ResultsContent::metadata).unwrap();
        assert_eq!(metadata.text("filename").as_deref(), Some("a.jpg"));
    }

    #[test]
    fn test_empty_predictions_show_no_results_with_metadata() {
        let (mut app, id) = submitted();
        let commands = respond(
            &mut app,
            id,
            json!({ "predictions": [], "metadata": { "filename": "a.jpg" } }),
        );
        assert!(commands.is_empty());
        assert!(matches!(
            app.results(),
            Some(ResultsContent::NoResults { metadata: Some(_) })
        ));
    }

    #[test]
    fn test_transport_errors_are_generic() {
        let (mut app, id) = submitted();
        app.update(Message::UploadFinished {
            request_id: id,
            result: Err(UploadError::Http { status: 502 }),
        });
        assert_eq!(app.phase(), Phase::ErrorShown);
        assert_eq!(
            app.error(),
            Some(
                "An error occurred while processing your request. HTTP error! Status: 502 Please check your API key and try again."
            )
        );
        assert!(app.phase().can_submit());
    }

    #[test]
    fn test_invalid_format_message() {
        let (mut app, id) = submitted();
        respond(&mut app, id, json!({ "status": "ok" }));
        assert_eq!(app.error(), Some("Invalid response format from server"));
    }

    #[test]
    fn test_new_file_while_submitting_cancels_request() {
        let (mut app, first) = submitted();
        let commands = app.update(Message::FileChosen(image(2)));
        assert_eq!(commands[0], Command::CancelUpload { request_id: first });
        assert_eq!(app.phase(), Phase::FileSelected);
        assert!(app.in_flight().is_none());

        // The late completion of the cancelled request changes nothing.
        let late = respond(&mut app, first, json!([{ "label": "cat", "score": 0.9 }]));
        assert!(late.is_empty());
        assert!(app.results().is_none());
        assert_eq!(app.phase(), Phase::FileSelected);
    }

    #[test]
    fn test_stale_completion_does_not_finish_current_request() {
        let (mut app, first) = submitted();
        app.update(Message::FileChosen(image(2)));
        let commands = app.update(Message::SubmitRequested);
        let Some(Command::Upload { request_id: second, key }) = commands.first().cloned() else {
            panic!("expected upload");
        };
        assert_ne!(first, second);
        assert_eq!(key, FileKey(2));

        respond(&mut app, first, json!({ "error": "late" }));
        assert_eq!(app.phase(), Phase::Submitting(second));
        assert!(app.error().is_none());
    }

    #[test]
    fn test_page_hidden_cancels_in_flight() {
        let (mut app, id) = submitted();
        let commands = app.update(Message::PageHidden);
        assert_eq!(commands, vec![Command::CancelUpload { request_id: id }]);
        assert_eq!(app.phase(), Phase::FileSelected);
        assert!(app.update(Message::PageHidden).is_empty());
    }

    #[test]
    fn test_metadata_toggle_scrolls_on_open_only() {
        let (mut app, id) = submitted();
        respond(&mut app, id, json!({ "predictions": [], "metadata": { "filename": "a.jpg" } }));

        let commands = app.update(Message::MetadataToggled);
        assert!(app.panel().is_open());
        assert_eq!(
            commands,
            vec![Command::ScrollIntoView {
                target: ScrollTarget::MetadataPanel,
                delay_ms: 200,
            }]
        );

        assert!(app.update(Message::MetadataToggled).is_empty());
        assert_eq!(app.panel(), MetadataPanel::Closed);
    }

    #[test]
    fn test_preview_for_replaced_file_dropped() {
        let mut app = selected();
        app.update(Message::FileChosen(image(2)));
        app.update(Message::PreviewReady {
            key: FileKey(1),
            data_url: "data:old".into(),
        });
        assert!(app.preview().is_none());
    }

    #[test]
    fn test_theme_toggle_persists() {
        let mut app = app();
        let commands = app.update(Message::ThemeToggled);
        assert_eq!(app.theme(), ThemeChoice::Dark);
        assert_eq!(commands, vec![Command::PersistTheme(ThemeChoice::Dark)]);
    }

    #[test]
    fn test_logo_flip_and_intro() {
        let mut app = app();
        assert_eq!(
            app.startup_commands(),
            vec![Command::Schedule {
                delay_ms: 300,
                message: ScheduledMessage::IntroReveal,
            }]
        );
        app.update(Message::IntroReveal);
        assert!(app.intro_shown());

        assert_eq!(app.update(Message::LogoClicked).len(), 1);
        assert!(app.logo_flipping());
        assert!(app.update(Message::LogoClicked).is_empty());
        app.update(Message::LogoAnimationDone);
        assert!(!app.logo_flipping());
    }

    #[test]
    fn test_drag_highlight() {
        let mut app = app();
        app.update(Message::DragEntered);
        assert!(app.drag_active());
        app.update(Message::DragLeft);
        assert!(!app.drag_active());
    }

    #[test]
    fn test_results_content_folds_empty_predictions() {
        let content = ResultsContent::from_classification(Classification {
            predictions: Vec::new(),
            metadata: None,
            insights: vec!["ignored".into()],
        });
        assert_eq!(content, ResultsContent::NoResults { metadata: None });
    }
}
