//! In-memory candidate source.

use super::item::{ItemKey, LocalItem};
use super::source::{CandidateSource, Resolution, SourceKind, meets_threshold};

/// Maximum number of candidates a local filter returns.
pub const LOCAL_RESULT_CAP: usize = 20;

/// Filters a list of `{ label, value }` items supplied by the form.
///
/// Matching is a case-insensitive substring test on label or value, keeps
/// the input order and stops after [`LOCAL_RESULT_CAP`] matches.
#[derive(Debug, Clone, Default)]
pub struct LocalSource {
    items: Vec<LocalItem>,
}

impl LocalSource {
    pub fn new(items: Vec<LocalItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[LocalItem] {
        &self.items
    }

    /// Replace the whole list.
    pub fn set_items(&mut self, items: Vec<LocalItem>) {
        self.items = items;
    }

    /// Label of the item with `value`, if present.
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.value == value)
            .map(|item| item.label.as_str())
    }

    /// Items matching `query`.
    pub fn filter(&self, query: &str, min_chars: usize) -> Vec<LocalItem> {
        if !meets_threshold(query, min_chars) {
            return Vec::new();
        }
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| item.matches(&needle))
            .take(LOCAL_RESULT_CAP)
            .cloned()
            .collect()
    }
}

impl CandidateSource for LocalSource {
    type Item = LocalItem;

    fn kind(&self) -> SourceKind {
        SourceKind::Local
    }

    fn resolve(&self, query: &str, min_chars: usize) -> Resolution<LocalItem> {
        Resolution::Ready(self.filter(query, min_chars))
    }

    fn label(&self, item: &LocalItem) -> String {
        item.label.clone()
    }

    fn item_key(&self, item: &LocalItem, _position: usize) -> ItemKey {
        ItemKey::Value(item.value.clone())
    }
}
