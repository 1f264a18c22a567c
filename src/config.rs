//! Page configuration: DOM class names and timings.
//!
//! Every field has a default matching the markup the server renders, so
//! `PageConfig::default()` is the normal choice. `from_json` lets a page
//! override individual values (for example from a `data-` attribute).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

pub const DEFAULT_FLASH_DISMISS_MS: u64 = 5000;
pub const DEFAULT_FLASH_TRANSITION_MS: u64 = 300;
pub const DEFAULT_ERROR_COLOR: &str = "#dc3545";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const DEFAULT_LOADING_TEXT: &str = "Loading...";

/// Class names forming the DOM contract between markup and this crate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub navbar: String,
    pub nav_toggle: String,
    pub nav_links: String,
    pub active: String,
    pub flash_container: String,
    pub flash: String,
    pub flash_close: String,
    pub form_group: String,
    pub field_error: String,
    pub loading: String,
    pub error: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            navbar: "navbar".into(),
            nav_toggle: "nav-toggle".into(),
            nav_links: "nav-links".into(),
            active: "active".into(),
            flash_container: "flash-messages".into(),
            flash: "flash".into(),
            flash_close: "flash-close".into(),
            form_group: "form-group".into(),
            field_error: "field-error".into(),
            loading: "loading".into(),
            error: "error".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub classes: ClassNames,
    /// Delay before a flash starts its exit transition.
    pub flash_dismiss_ms: u64,
    /// Length of the exit transition; the element is removed afterwards.
    pub flash_transition_ms: u64,
    pub error_color: String,
    pub loading_text: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            classes: ClassNames::default(),
            flash_dismiss_ms: DEFAULT_FLASH_DISMISS_MS,
            flash_transition_ms: DEFAULT_FLASH_TRANSITION_MS,
            error_color: DEFAULT_ERROR_COLOR.to_owned(),
            loading_text: DEFAULT_LOADING_TEXT.to_owned(),
        }
    }
}

impl PageConfig {
    /// Parse a JSON override object. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the decode error if `raw` is not a JSON object of the right shape.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Like [`PageConfig::from_json`], but falls back to defaults on bad input.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("invalid page config, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// CSS animation applied while a flash leaves the page.
    pub fn flash_exit_animation(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let secs = self.flash_transition_ms as f64 / 1000.0;
        format!("slideOut {secs}s ease")
    }
}
