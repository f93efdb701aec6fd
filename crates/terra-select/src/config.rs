//! Control and form configuration.
//!
//! Configuration is plain serde data and is usually read from TOML:
//!
//! ```toml
//! backend_url = "http://localhost:5000"
//!
//! [soil_search]
//! placeholder = "Type city, district, state, or soil type (e.g., Kurnool, Black)"
//! min_chars = 0
//! label_key = "label"
//!
//! [crop_select]
//! placeholder = "Start typing to search crops..."
//! min_chars = 0
//! ```
//!
//! An omitted table takes the form's defaults; omitted keys inside a table
//! take the control's defaults. An empty `soil_search.search_url` resolves
//! to `<backend_url>/api/soils`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combobox::{ControlOptions, DEFAULT_LABEL_KEY};
use crate::error::{Result, SelectError};

const DEFAULT_PLACEHOLDER: &str = "Search...";
const SOIL_PLACEHOLDER: &str = "Type city, district, state, or soil type (e.g., Kurnool, Black)";
const CROP_PLACEHOLDER: &str = "Start typing to search crops...";

/// Default backend address used by the recommendation form.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Path of the soil search endpoint under the backend.
pub const SOIL_SEARCH_PATH: &str = "/api/soils";

/// Options for a server-backed control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSelectConfig {
    /// Absolute search endpoint; empty means "derive from the backend URL".
    pub search_url: String,
    pub placeholder: String,
    pub min_chars: usize,
    /// Record field shown as the candidate label.
    pub label_key: String,
}

impl Default for RemoteSelectConfig {
    fn default() -> Self {
        Self {
            search_url: String::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            min_chars: 2,
            label_key: DEFAULT_LABEL_KEY.to_string(),
        }
    }
}

impl RemoteSelectConfig {
    pub fn control_options(&self) -> ControlOptions {
        ControlOptions::new(self.placeholder.clone(), self.min_chars)
    }
}

/// Options for an in-memory control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSelectConfig {
    pub placeholder: String,
    pub min_chars: usize,
}

impl Default for LocalSelectConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            min_chars: 1,
        }
    }
}

impl LocalSelectConfig {
    pub fn control_options(&self) -> ControlOptions {
        ControlOptions::new(self.placeholder.clone(), self.min_chars)
    }
}

/// Configuration of the recommendation form's two controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub backend_url: String,
    pub soil_search: RemoteSelectConfig,
    pub crop_select: LocalSelectConfig,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            soil_search: RemoteSelectConfig {
                placeholder: SOIL_PLACEHOLDER.to_string(),
                min_chars: 0,
                ..RemoteSelectConfig::default()
            },
            crop_select: LocalSelectConfig {
                placeholder: CROP_PLACEHOLDER.to_string(),
                min_chars: 0,
            },
        }
    }
}

impl FormConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// [`SelectError::Config`] for malformed TOML, [`SelectError::InvalidConfig`]
    /// for an empty backend URL.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        if config.backend_url.trim().is_empty() {
            return Err(SelectError::InvalidConfig(
                "backend_url must not be empty".to_string(),
            ));
        }
        tracing::debug!(
            target: "terra_select::config",
            backend_url = %config.backend_url,
            search_url = %config.soil_search_url(),
            "form configuration loaded"
        );
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    /// The soil search endpoint, derived from the backend URL unless set.
    pub fn soil_search_url(&self) -> String {
        if self.soil_search.search_url.is_empty() {
            format!("{}{}", self.backend_url.trim_end_matches('/'), SOIL_SEARCH_PATH)
        } else {
            self.soil_search.search_url.clone()
        }
    }
}
