//! Logging conventions for terra-select.
//!
//! terra-select uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter(EnvFilter::new("terra_select=debug,terra_select_net=debug"))
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Levels follow one convention across the workspace: `trace` for timer
//! scheduling and signal emission, `debug` for state transitions and
//! request decisions, `warn` for remote failures that were degraded to an
//! empty result.

/// Span names used throughout terra-select for tracing.
pub mod span_names {
    /// Combobox event processing span.
    pub const COMBOBOX_EVENT: &str = "terra_select::combobox::event";
    /// Remote lookup span.
    pub const REMOTE_LOOKUP: &str = "terra_select::combobox::lookup";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Combobox state machine target.
    pub const COMBOBOX: &str = "terra_select::combobox";
    /// Delayed-commit timer target.
    pub const TIMER: &str = "terra_select::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "terra_select::signal";
    /// Pointer stream target.
    pub const POINTER: &str = "terra_select::pointer";
    /// Recommendation form target.
    pub const FORM: &str = "terra_select::form";
    /// Configuration loading target.
    pub const CONFIG: &str = "terra_select::config";
    /// HTTP client target.
    pub const HTTP: &str = "terra_select_net::http";
    /// Agronomy backend client target.
    pub const AGRONOMY: &str = "terra_select_net::agronomy";
}
