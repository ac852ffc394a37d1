//! Theme system for photocheck.
//!
//! Dark and light appearance. The choice is the only state the app persists:
//! a single localStorage key holding `"dark"` or `"light"`.

use std::fmt;

/// Theme choice - dark or light mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeChoice {
    Dark,
    #[default]
    Light,
}

impl ThemeChoice {
    /// Value stored in localStorage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeChoice::Dark => "dark",
            ThemeChoice::Light => "light",
        }
    }

    /// Parse a stored value. Unknown values are ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(ThemeChoice::Dark),
            "light" => Some(ThemeChoice::Light),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(&self) -> Self {
        match self {
            ThemeChoice::Dark => ThemeChoice::Light,
            ThemeChoice::Light => ThemeChoice::Dark,
        }
    }

    /// Whether the body carries the `dark-mode` class.
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeChoice::Dark)
    }

    /// Icon shown on the theme toggle (the theme you would switch to).
    pub fn toggle_icon(&self) -> &'static str {
        match self {
            ThemeChoice::Dark => "fas fa-sun",
            ThemeChoice::Light => "fas fa-moon",
        }
    }

    /// Pick the initial theme: an explicit stored choice wins, otherwise
    /// follow the system color-scheme preference.
    pub fn resolve(stored: Option<&str>, prefers_dark: bool) -> Self {
        match stored.and_then(Self::parse) {
            Some(choice) => choice,
            None if prefers_dark => ThemeChoice::Dark,
            None => ThemeChoice::Light,
        }
    }
}

impl fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read the stored preference, falling back to `prefers-color-scheme` (WASM only).
#[cfg(target_arch = "wasm32")]
pub fn load_preference() -> ThemeChoice {
    use crate::constants::THEME_STORAGE_KEY;

    let stored = local_storage().and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
    let prefers_dark = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|query| query.matches());

    let theme = ThemeChoice::resolve(stored.as_deref(), prefers_dark);
    log::debug!(
        "Theme resolved to {} (stored: {:?}, prefers dark: {})",
        theme,
        stored,
        prefers_dark
    );
    theme
}

/// Persist the preference (WASM only). Storage failures are logged and ignored.
#[cfg(target_arch = "wasm32")]
pub fn save_preference(theme: ThemeChoice) {
    use crate::constants::THEME_STORAGE_KEY;

    match local_storage() {
        Some(storage) => {
            if let Err(e) = storage.set_item(THEME_STORAGE_KEY, theme.as_str()) {
                log::warn!("Failed to save theme to localStorage: {:?}", e);
            }
        }
        None => log::warn!("localStorage not available; theme not saved"),
    }
}
