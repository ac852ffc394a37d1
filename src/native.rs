//! Native command-line client.
//!
//! Classifies one local image against a running backend by driving the same
//! controller the browser uses: `FileChosen`, then `SubmitRequested`, with the
//! upload performed by a blocking `reqwest` multipart POST. The resulting
//! results panel and metadata tabs are printed as text.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use photocheck_ui::{Dispatcher, ElementPatch, Surface};
use reqwest::blocking::{multipart, Client};

use crate::app::PhotoCheckApp;
use crate::config::{AppConfig, LogLevel};
use crate::error::UploadError;
use crate::message::{Command, Message};
use crate::model::{ClassificationResponse, FileInfo, FileKey};
use crate::state::Phase;
use crate::theme::ThemeChoice;
use crate::upload;
use crate::views::text_report;

/// Backend address used when `--server` is not given.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:81";

/// Classify an image with a running photocheck backend.
#[derive(Debug, Parser)]
#[command(name = "photocheck-native", version, about)]
pub struct Cli {
    /// Image file to classify
    pub file: PathBuf,

    /// Base URL of the backend
    #[arg(long, default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Log verbosity (overrides the config file; RUST_LOG overrides both)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Configuration file (defaults to the per-user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Surface for a run without a page; patches are only traced.
struct Headless;

impl Surface for Headless {
    fn apply(&mut self, patches: &[ElementPatch]) {
        log::trace!("View produced {} patch(es)", patches.len());
    }
}

/// Run the client and report how it went.
pub fn run(cli: Cli) -> ExitCode {
    let config = match &cli.config {
        Some(path) => match AppConfig::load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::load_from_default_path().unwrap_or_default(),
    };

    let level = cli.log_level.unwrap_or(config.log_level);
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .init();

    let info = match describe_file(&cli.file) {
        Ok(info) => info,
        Err(e) => {
            eprintln!("Cannot read {}: {}", cli.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let url = upload_url(&cli.server, &config.upload.endpoint);
    let field_name = config.upload.field_name.clone();
    let path = cli.file.clone();
    let client = Client::new();

    let dispatcher = Dispatcher::new(
        PhotoCheckApp::new(config, ThemeChoice::default(), None),
        Headless,
    );
    dispatcher.set_executor(move |command, dispatcher| match command {
        Command::Upload { request_id, key } => {
            log::info!("POST {} ({})", url, path.display());
            let mime = guess_mime(&path).unwrap_or("application/octet-stream");
            let result = send(&client, &url, &field_name, &path, key, mime);
            dispatcher.dispatch(Message::UploadFinished { request_id, result });
        }
        other => log::trace!("Ignoring {:?} outside the browser", other),
    });
    dispatcher.start(Vec::new());
    dispatcher.dispatch(Message::FileChosen(info));
    dispatcher.dispatch(Message::SubmitRequested);

    dispatcher.with_app(|app| {
        print!("{}", text_report(app.error(), app.results()));
        match app.phase() {
            Phase::Idle | Phase::ErrorShown => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        }
    })
}

/// Join the server base URL and the endpoint path.
pub fn upload_url(server: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        server.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Describe a local file the way a browser would.
fn describe_file(path: &Path) -> std::io::Result<FileInfo> {
    let metadata = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime = guess_mime(path).unwrap_or_default();
    Ok(FileInfo::new(FileKey(1), name, metadata.len(), mime))
}

/// Image MIME type from the file extension. `None` for anything else, which
/// browsers report as an empty type.
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_string_lossy().to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "heic" => "image/heic",
        _ => return None,
    };
    Some(mime)
}

fn send(
    client: &Client,
    url: &str,
    field_name: &str,
    path: &Path,
    key: FileKey,
    mime: &str,
) -> Result<ClassificationResponse, UploadError> {
    log::debug!("Uploading file {:?} as field {:?}", key, field_name);
    let bytes = std::fs::read(path).map_err(|e| UploadError::Network(e.to_string()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let part = multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| UploadError::Network(e.to_string()))?;
    let form = multipart::Form::new().part(field_name.to_string(), part);

    let response = client
        .post(url)
        .multipart(form)
        .send()
        .map_err(|e| UploadError::Network(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .map_err(|e| UploadError::Network(e.to_string()))?;
    upload::interpret(status, &body)
}
