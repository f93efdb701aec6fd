//! The candidate source capability.
//!
//! A [`CandidateSource`] turns a query into a candidate list, either right
//! away ([`Resolution::Ready`]) or through a future
//! ([`Resolution::Pending`]). The combobox state machine is written once
//! against this trait; the remote and local variants only differ in how
//! they resolve.

use futures_util::future::BoxFuture;

use super::item::ItemKey;
use crate::error::SelectError;

/// A candidate lookup in flight.
pub type LookupFuture<T> = BoxFuture<'static, Result<Vec<T>, SelectError>>;

/// Outcome of asking a source for candidates.
pub enum Resolution<T> {
    /// The list is known now.
    Ready(Vec<T>),
    /// The list will be known when the future completes.
    Pending(LookupFuture<T>),
}

impl<T> Resolution<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Resolution<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(items) => f.debug_tuple("Ready").field(items).finish(),
            Self::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// Which flavour of control a source drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Asynchronous, fed by the committed (settled) query.
    Remote,
    /// Synchronous, fed by the live query.
    Local,
}

/// Text shown while a lookup is outstanding.
pub const LOADING_TEXT: &str = "Searching...";

impl SourceKind {
    /// Hint shown while the query is below the minimum length.
    pub fn prompt_text(self, min_chars: usize) -> String {
        match self {
            Self::Remote => format!("Type at least {min_chars} character(s) to search"),
            Self::Local => format!("Type at least {min_chars} character(s) to see suggestions"),
        }
    }

    /// Text shown when a long-enough query has no candidates.
    pub fn empty_text(self) -> &'static str {
        match self {
            Self::Remote => "No results",
            Self::Local => "No matches",
        }
    }
}

/// Check whether `query` is long enough to look up.
///
/// Surrounding whitespace does not count towards the length.
pub fn meets_threshold(query: &str, min_chars: usize) -> bool {
    query.trim().chars().count() >= min_chars
}

/// Produces candidate lists for a combobox.
pub trait CandidateSource: Send + 'static {
    /// The candidate type reported on activation.
    type Item: Clone + Send + Sync + 'static;

    fn kind(&self) -> SourceKind;

    /// Candidates for `query`.
    ///
    /// A query below `min_chars` must resolve to an empty, ready list.
    fn resolve(&self, query: &str, min_chars: usize) -> Resolution<Self::Item>;

    /// Display label of a candidate.
    fn label(&self, item: &Self::Item) -> String;

    /// Row identity of a candidate at `position` in the list.
    fn item_key(&self, item: &Self::Item, position: usize) -> ItemKey;
}
