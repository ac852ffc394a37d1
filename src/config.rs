//! Configuration support for photocheck.
//!
//! Settings are plain JSON. In the browser the page may embed a
//! `<script type="application/json" id="photocheck-config">` block to override
//! the defaults; the native client reads a file from the user's config
//! directory. Only the theme is ever persisted by the app itself (see
//! [`crate::theme`]).

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_INTRO_DELAY_MS, DEFAULT_LOGO_FLIP_MS, DEFAULT_MAX_FILE_SIZE, DEFAULT_MIME_PREFIX,
    DEFAULT_PROGRESS_REVEAL_MS, DEFAULT_SCROLL_DELAY_MS, DEFAULT_UPLOAD_ENDPOINT,
    DEFAULT_UPLOAD_FIELD,
};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(not(target_arch = "wasm32"), derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Where and how the selected image is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Endpoint receiving the multipart POST
    pub endpoint: String,
    /// Multipart field name for the file
    pub field_name: String,
    /// Largest accepted file in bytes
    pub max_file_size: u64,
    /// Required MIME type prefix
    pub mime_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            field_name: DEFAULT_UPLOAD_FIELD.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            mime_prefix: DEFAULT_MIME_PREFIX.to_string(),
        }
    }
}

/// Cosmetic delays, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub progress_reveal_ms: u32,
    pub scroll_delay_ms: u32,
    pub logo_flip_ms: u32,
    pub intro_delay_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            progress_reveal_ms: DEFAULT_PROGRESS_REVEAL_MS,
            scroll_delay_ms: DEFAULT_SCROLL_DELAY_MS,
            logo_flip_ms: DEFAULT_LOGO_FLIP_MS,
            intro_delay_ms: DEFAULT_INTRO_DELAY_MS,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_app_name() -> String {
    "photocheck".to_string()
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            upload: UploadConfig::default(),
            timing: TimingConfig::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        if config.upload.max_file_size == 0 {
            return Err(ConfigError::Invalid(
                "upload.max_file_size must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "photocheck-config.json"
    }

    /// Get the default config file path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("photocheck").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("photocheck")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Read overrides embedded in the page (WASM only).
    /// Returns None if the block is absent or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_page() -> Option<Self> {
        use crate::constants::CONFIG_ELEMENT_ID;

        let document = web_sys::window()?.document()?;
        let json = document
            .get_element_by_id(CONFIG_ELEMENT_ID)?
            .text_content()?;

        match Self::from_json(&json) {
            Ok(config) => Some(config),
            Err(e) => {
                // Logging is not initialised yet; report straight to the console.
                web_sys::console::warn_1(
                    &format!("Ignoring invalid #{CONFIG_ELEMENT_ID}: {e}").into(),
                );
                None
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
