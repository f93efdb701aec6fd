//! Error types for the selection controls.

use terra_select_core::CoreError;
#[cfg(feature = "networking")]
use terra_select_net::NetworkError;

/// Errors produced by terra-select.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// Error from the core systems.
    #[error(transparent)]
    Core(#[from] CoreError),
    /// Error talking to the backend.
    #[cfg(feature = "networking")]
    #[error(transparent)]
    Network(#[from] NetworkError),
    /// A search backend failed for a reason of its own.
    #[error("Search failed: {0}")]
    Search(String),
    /// A configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    /// A configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// A configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Required form fields are empty.
    #[error("Missing required fields: {}", .missing.join(", "))]
    Validation {
        /// Names of the empty fields, in form order.
        missing: Vec<&'static str>,
    },
}

/// A specialized Result type for terra-select operations.
pub type Result<T> = std::result::Result<T, SelectError>;
