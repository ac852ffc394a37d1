//! Global constants for the photocheck controller

/// One mebibyte in bytes.
pub const MIB: u64 = 1024 * 1024;

/// Largest file accepted for upload (matches the backend's content-length cap).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * MIB;

/// Endpoint that receives the multipart upload.
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "/upload";

/// Multipart field name carrying the image.
pub const DEFAULT_UPLOAD_FIELD: &str = "file1";

/// MIME prefix a selected file must carry.
pub const DEFAULT_MIME_PREFIX: &str = "image/";

/// Delay before progress bars animate to their score.
pub const DEFAULT_PROGRESS_REVEAL_MS: u32 = 300;

/// Delay before scrolling results or the metadata panel into view.
pub const DEFAULT_SCROLL_DELAY_MS: u32 = 200;

/// Duration of the logo flip animation.
pub const DEFAULT_LOGO_FLIP_MS: u32 = 1000;

/// Delay before the upload area fades in after load.
pub const DEFAULT_INTRO_DELAY_MS: u32 = 300;

/// LocalStorage key holding the theme preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Id of the optional `<script type="application/json">` config block.
pub const CONFIG_ELEMENT_ID: &str = "photocheck-config";

/// Element ids the page must provide.
pub mod ids {
    pub const UPLOAD_AREA: &str = "upload-area";
    pub const FILE_INPUT: &str = "file-input";
    pub const FILE_INFO: &str = "file-info";
    pub const FILE_NAME: &str = "file-name";
    pub const SUBMIT_BUTTON: &str = "submit-btn";
    pub const PREVIEW_CONTAINER: &str = "preview-container";
    pub const IMAGE_PREVIEW: &str = "image-preview";
    pub const RESULTS_CONTAINER: &str = "results-container";
    pub const RESULTS_CONTENT: &str = "results-content";
    pub const ERROR_CONTAINER: &str = "error-container";
    pub const ERROR_MESSAGE: &str = "error-message";
    pub const THEME_TOGGLE: &str = "theme-toggle";

    // Optional
    pub const METADATA_DROPDOWN: &str = "metadata-dropdown";
    pub const METADATA_TOGGLE: &str = "metadata-toggle";
    pub const CURRENT_DATE: &str = "current-date";

    /// Ids checked at startup.
    pub const REQUIRED: &[&str] = &[
        UPLOAD_AREA,
        FILE_INPUT,
        FILE_INFO,
        FILE_NAME,
        SUBMIT_BUTTON,
        PREVIEW_CONTAINER,
        IMAGE_PREVIEW,
        RESULTS_CONTAINER,
        RESULTS_CONTENT,
        ERROR_CONTAINER,
        ERROR_MESSAGE,
        THEME_TOGGLE,
    ];
}
