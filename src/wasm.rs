//! Browser entry point.
//!
//! Mounts [`PhotoCheckApp`] on the page: checks the DOM contract, binds page
//! events to messages and executes the controller's commands (file picker,
//! preview reading, abortable uploads, scrolling, timers, theme storage).

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, DragEvent, Event, FormData, HtmlInputElement, RequestInit, Response,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use photocheck_ui::dom::{self, DomSurface};
use photocheck_ui::{Callback, Dispatcher, DomError};

use crate::app::PhotoCheckApp;
use crate::config::AppConfig;
use crate::constants::ids;
use crate::error::UploadError;
use crate::message::{Command, Message, ScrollTarget};
use crate::model::{ClassificationResponse, FileKey};
use crate::state::{MetadataTab, RequestId};
use crate::theme;
use crate::upload;
use crate::wasm_file::{first_file, read_data_url, FileStore};

type AppDispatcher = Dispatcher<PhotoCheckApp>;

/// Mount the controller on the current page.
#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load_from_page().unwrap_or_default();
    if let Err(e) = console_log::init_with_level(config.log_level.to_level()) {
        web_sys::console::warn_1(&format!("Logger already initialised: {e}").into());
    }
    log::info!("{} starting (log level: {})", config.app_name, config.log_level.name());

    if let Err(e) = mount(config) {
        log::error!("Failed to mount photocheck: {}", e);
    }
}

/// The request currently on the wire.
struct InFlight {
    request_id: RequestId,
    handle: AbortHandle,
    controller: AbortController,
}

/// Browser-side resources the controller refers to by key or id.
struct Runtime {
    config: AppConfig,
    files: FileStore,
    upload: Option<InFlight>,
}

type SharedRuntime = Rc<RefCell<Runtime>>;

fn mount(config: AppConfig) -> Result<(), DomError> {
    dom::require_elements(ids::REQUIRED)?;

    let app = PhotoCheckApp::new(config.clone(), theme::load_preference(), Some(today()));
    let startup = app.startup_commands();
    let dispatcher = Dispatcher::new(app, DomSurface::new());
    let runtime: SharedRuntime = Rc::new(RefCell::new(Runtime {
        config,
        files: FileStore::new(),
        upload: None,
    }));

    {
        let runtime = Rc::clone(&runtime);
        dispatcher.set_executor(move |command, dispatcher| execute(&runtime, command, dispatcher));
    }
    bind_events(&dispatcher, &runtime)?;
    dispatcher.start(startup);

    log::info!("photocheck mounted");
    Ok(())
}

/// Local date as `YYYY-MM-DD`.
fn today() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

// ============================================================================
// Event binding
// ============================================================================

fn bind_events(dispatcher: &AppDispatcher, runtime: &SharedRuntime) -> Result<(), DomError> {
    let document = dom::document()?;
    let upload_area = dom::element_by_id(ids::UPLOAD_AREA)?;
    let file_input: HtmlInputElement = dom::typed_element_by_id(ids::FILE_INPUT, "input")?;

    // Clicks on the input itself bubble up here; ignore them.
    dom::bind(
        dispatcher,
        &upload_area,
        "click",
        Callback::filter_map(|event: Event| {
            let on_input = dom::closest_target(&event, &format!("#{}", ids::FILE_INPUT)).is_some();
            (!on_input).then_some(Message::BrowseRequested)
        }),
    )?;

    {
        let runtime = Rc::clone(runtime);
        dom::bind(
            dispatcher,
            &file_input,
            "change",
            Callback::new(move |event: Event| {
                let files = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                    .and_then(|input| input.files());
                match first_file(files) {
                    Some(file) => Message::FileChosen(runtime.borrow_mut().files.insert(file)),
                    None => Message::NoFileChosen,
                }
            }),
        )?;
    }

    // Drag and drop. The body also swallows drops so a missed target does not
    // navigate away from the page.
    for event in ["dragenter", "dragover"] {
        dom::bind(
            dispatcher,
            &upload_area,
            event,
            Callback::new(|event: Event| {
                event.prevent_default();
                event.stop_propagation();
                Message::DragEntered
            }),
        )?;
    }
    for event in ["dragleave", "drop"] {
        dom::bind(
            dispatcher,
            &upload_area,
            event,
            Callback::new(|event: Event| {
                event.prevent_default();
                Message::DragLeft
            }),
        )?;
    }
    {
        let runtime = Rc::clone(runtime);
        dom::bind(
            dispatcher,
            &upload_area,
            "drop",
            Callback::new(move |event: Event| {
                let files = event
                    .dyn_ref::<DragEvent>()
                    .and_then(DragEvent::data_transfer)
                    .and_then(|transfer| transfer.files());
                match first_file(files) {
                    Some(file) => Message::FileChosen(runtime.borrow_mut().files.insert(file)),
                    None => Message::NoFileChosen,
                }
            }),
        )?;
    }
    if let Some(body) = document.body() {
        for event in ["dragenter", "dragover", "dragleave", "drop"] {
            dom::bind(
                dispatcher,
                &body,
                event,
                Callback::filter_map(|event: Event| {
                    event.prevent_default();
                    None
                }),
            )?;
        }
    }

    dom::bind(
        dispatcher,
        &dom::element_by_id(ids::SUBMIT_BUTTON)?,
        "click",
        Callback::new(|_: Event| Message::SubmitRequested),
    )?;
    dom::bind(
        dispatcher,
        &dom::element_by_id(ids::THEME_TOGGLE)?,
        "click",
        Callback::new(|_: Event| Message::ThemeToggled),
    )?;

    // The toggle is re-rendered with the results, so listen on its container.
    dom::bind(
        dispatcher,
        &dom::element_by_id(ids::RESULTS_CONTENT)?,
        "click",
        Callback::filter_map(|event: Event| {
            dom::closest_target(&event, &format!("#{}", ids::METADATA_TOGGLE))
                .map(|_| Message::MetadataToggled)
        }),
    )?;

    match document.get_element_by_id(ids::METADATA_DROPDOWN) {
        Some(dropdown) => dom::bind(
            dispatcher,
            &dropdown,
            "click",
            Callback::filter_map(|event: Event| {
                let link = dom::closest_target(&event, ".tab-link")?;
                event.prevent_default();
                let tab = link.get_attribute("data-tab")?;
                MetadataTab::from_id(&tab).map(Message::TabSelected)
            }),
        )?,
        None => log::debug!("No #{} on page; metadata tabs disabled", ids::METADATA_DROPDOWN),
    }

    if let Some(logo) = document.query_selector(".logo")? {
        dom::bind(
            dispatcher,
            &logo,
            "click",
            Callback::new(|_: Event| Message::LogoClicked),
        )?;
    }

    dom::bind(
        dispatcher,
        &dom::window()?,
        "pagehide",
        Callback::new(|_: Event| Message::PageHidden),
    )?;

    Ok(())
}

// ============================================================================
// Command execution
// ============================================================================

fn execute(runtime: &SharedRuntime, command: Command, dispatcher: &AppDispatcher) {
    log::trace!("Executing {:?}", command);
    let result = match command {
        Command::OpenFilePicker => open_file_picker(),
        Command::ClearFileInput => clear_file_input(runtime),
        Command::ReadPreview { key } => {
            read_preview(runtime, key, dispatcher);
            Ok(())
        }
        Command::Upload { request_id, key } => {
            start_upload(runtime, request_id, key, dispatcher);
            Ok(())
        }
        Command::CancelUpload { request_id } => {
            cancel_upload(runtime, request_id);
            Ok(())
        }
        Command::PersistTheme(choice) => {
            theme::save_preference(choice);
            Ok(())
        }
        Command::ScrollIntoView { target, delay_ms } => {
            dom::set_timeout(delay_ms, move || scroll_into_view(target)).map(|_| ())
        }
        Command::Schedule { delay_ms, message } => {
            let dispatcher = dispatcher.clone();
            dom::set_timeout(delay_ms, move || dispatcher.dispatch(message.into())).map(|_| ())
        }
    };

    if let Err(e) = result {
        log::warn!("Command failed: {}", e);
    }
}

fn open_file_picker() -> Result<(), DomError> {
    let input: HtmlInputElement = dom::typed_element_by_id(ids::FILE_INPUT, "input")?;
    input.click();
    Ok(())
}

fn clear_file_input(runtime: &SharedRuntime) -> Result<(), DomError> {
    runtime.borrow_mut().files.clear();
    let input: HtmlInputElement = dom::typed_element_by_id(ids::FILE_INPUT, "input")?;
    input.set_value("");
    Ok(())
}

fn read_preview(runtime: &SharedRuntime, key: FileKey, dispatcher: &AppDispatcher) {
    let Some(file) = runtime.borrow().files.get(key) else {
        log::debug!("Preview requested for unknown file {:?}", key);
        return;
    };
    let dispatcher = dispatcher.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let message = match read_data_url(&file).await {
            Ok(data_url) => Message::PreviewReady { key, data_url },
            Err(e) => Message::PreviewFailed {
                key,
                reason: e.to_string(),
            },
        };
        dispatcher.dispatch(message);
    });
}

fn start_upload(runtime: &SharedRuntime, request_id: RequestId, key: FileKey, dispatcher: &AppDispatcher) {
    let (file, endpoint, field_name) = {
        let runtime = runtime.borrow();
        (
            runtime.files.get(key),
            runtime.config.upload.endpoint.clone(),
            runtime.config.upload.field_name.clone(),
        )
    };
    let Some(file) = file else {
        dispatcher.dispatch(Message::UploadFinished {
            request_id,
            result: Err(UploadError::Network("The selected file is no longer available.".into())),
        });
        return;
    };

    let controller = match AbortController::new() {
        Ok(controller) => controller,
        Err(e) => {
            dispatcher.dispatch(Message::UploadFinished {
                request_id,
                result: Err(UploadError::Network(dom::js_error_message(&e))),
            });
            return;
        }
    };
    let (handle, registration) = AbortHandle::new_pair();
    let request = Abortable::new(
        send(endpoint, field_name, file, controller.clone()),
        registration,
    );
    runtime.borrow_mut().upload = Some(InFlight {
        request_id,
        handle,
        controller,
    });

    let runtime = Rc::clone(runtime);
    let dispatcher = dispatcher.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = request.await;
        {
            let mut runtime = runtime.borrow_mut();
            if runtime.upload.as_ref().is_some_and(|u| u.request_id == request_id) {
                runtime.upload = None;
            }
        }
        match outcome {
            Ok(result) => dispatcher.dispatch(Message::UploadFinished { request_id, result }),
            Err(_) => log::debug!("Request {} aborted", request_id.0),
        }
    });
}

fn cancel_upload(runtime: &SharedRuntime, request_id: RequestId) {
    let in_flight = runtime
        .borrow_mut()
        .upload
        .take_if(|u| u.request_id == request_id);
    match in_flight {
        Some(in_flight) => {
            in_flight.handle.abort();
            in_flight.controller.abort();
            log::info!("Aborted request {}", request_id.0);
        }
        None => log::debug!("Request {} already finished", request_id.0),
    }
}

/// POST the file as multipart form data and interpret the reply.
async fn send(
    endpoint: String,
    field_name: String,
    file: web_sys::File,
    controller: AbortController,
) -> Result<ClassificationResponse, UploadError> {
    let form = FormData::new().map_err(network_error)?;
    form.append_with_blob_and_filename(&field_name, &file, &file.name())
        .map_err(network_error)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);
    init.set_signal(Some(&controller.signal()));

    let window = dom::window().map_err(|e| UploadError::Network(e.to_string()))?;
    let response = JsFuture::from(window.fetch_with_str_and_init(&endpoint, &init))
        .await
        .map_err(network_error)?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| UploadError::Network("fetch did not return a Response".into()))?;

    let status = response.status();
    let body = JsFuture::from(response.text().map_err(network_error)?)
        .await
        .map_err(network_error)?;
    upload::interpret(status, &body.as_string().unwrap_or_default())
}

fn network_error(value: JsValue) -> UploadError {
    let name = js_sys::Reflect::get(&value, &JsValue::from_str("name"))
        .ok()
        .and_then(|n| n.as_string());
    if name.as_deref() == Some("AbortError") {
        return UploadError::Cancelled;
    }
    UploadError::Network(dom::js_error_message(&value))
}

fn scroll_into_view(target: ScrollTarget) {
    let (id, block) = match target {
        ScrollTarget::Error => (ids::ERROR_CONTAINER, ScrollLogicalPosition::Center),
        ScrollTarget::Results => (ids::RESULTS_CONTAINER, ScrollLogicalPosition::Start),
        ScrollTarget::MetadataPanel => (ids::METADATA_DROPDOWN, ScrollLogicalPosition::Nearest),
    };
    let Ok(element) = dom::element_by_id(id) else {
        log::debug!("Nothing to scroll to: #{} not on page", id);
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(block);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}
