//! Commonly used types.
//!
//! ```ignore
//! use terra_select::prelude::*;
//! ```

// ============================================================================
// Controls
// ============================================================================

pub use crate::combobox::{
    CandidateItem, CandidateRow, CandidateSource, Combobox, ControlOptions, DisplayState,
    LocalItem, LocalSource, RemoteSource, SearchBackend,
};
#[cfg(feature = "networking")]
pub use crate::combobox::HttpSearchBackend;

// ============================================================================
// Configuration and Forms
// ============================================================================

pub use crate::config::{FormConfig, LocalSelectConfig, RemoteSelectConfig};
#[cfg(feature = "networking")]
pub use crate::form::{RecommendationForm, bind_crop_select, bind_soil_search};

// ============================================================================
// Core
// ============================================================================

pub use crate::error::SelectError;
pub use terra_select_core::{ConnectionId, Point, PointerEvents, Rect, Signal};
