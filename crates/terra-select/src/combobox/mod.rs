//! Searchable combobox.
//!
//! [`Combobox`] is one state machine parameterized over a
//! [`CandidateSource`]. Two sources ship with the crate:
//!
//! - [`RemoteSource`]: each keystroke restarts a settling delay; when it
//!   elapses the settled query is looked up on a [`SearchBackend`]. Every
//!   lookup carries a [`RequestToken`] and only the newest one may update
//!   the list, whatever order the responses arrive in.
//! - [`LocalSource`]: the live query filters an in-memory list right away.
//!
//! # Event processing
//!
//! Timer expiry, lookup completions and outside-click dismissals complete
//! on the Tokio runtime. They are queued and applied when the owner calls
//! [`Combobox::process_pending`] or [`Combobox::process_next`], so state
//! only ever changes inside a `&mut self` call.
//!
//! # Example
//!
//! ```ignore
//! use terra_select::combobox::{Combobox, ControlOptions, LocalItem, LocalSource};
//! use terra_select_core::PointerEvents;
//!
//! let source = LocalSource::new(vec![
//!     LocalItem::new("Rice (Kharif)", "rice"),
//!     LocalItem::new("Wheat (Rabi)", "wheat"),
//! ]);
//! let mut crop = Combobox::mount(source, ControlOptions::default(), &PointerEvents::global())?;
//!
//! crop.activated.connect(|item| println!("picked {}", item.value));
//!
//! crop.set_query("RIC");
//! assert_eq!(crop.candidates().len(), 1);
//! crop.activate(0);
//! assert_eq!(crop.display_text(), "Rice (Kharif)");
//! ```

mod item;
mod local;
mod outside;
mod remote;
mod source;
mod state;

pub use item::{CandidateItem, ItemKey, LocalItem};
#[cfg(feature = "networking")]
pub use item::crop_items;
pub use local::{LOCAL_RESULT_CAP, LocalSource};
pub use outside::OutsideClickDetector;
pub use remote::{DEFAULT_LABEL_KEY, REMOTE_RESULT_CAP, RemoteSource, SearchBackend};
#[cfg(feature = "networking")]
pub use remote::HttpSearchBackend;
pub use source::{
    CandidateSource, LOADING_TEXT, LookupFuture, Resolution, SourceKind, meets_threshold,
};
pub use state::{ControlState, DisplayState, RequestToken, RequestTokens};

use tokio::runtime::Handle;
use tracing::Instrument;

use terra_select_core::logging::{span_names, targets};
use terra_select_core::{
    CoreError, DEFAULT_SETTLE_DELAY, DelayedCommit, EventQueue, PointerEvents, Rect, Signal,
    TimerId,
};

use crate::error::{Result, SelectError};

/// Per-instance options shared by both variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlOptions {
    /// Text shown in the empty input.
    pub placeholder: String,
    /// Minimum trimmed query length before candidates are looked up.
    pub min_chars: usize,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            placeholder: "Search...".to_string(),
            min_chars: 1,
        }
    }
}

impl ControlOptions {
    pub fn new(placeholder: impl Into<String>, min_chars: usize) -> Self {
        Self {
            placeholder: placeholder.into(),
            min_chars,
        }
    }
}

/// Work completed off the owner's call stack, waiting to be applied.
#[derive(Debug)]
pub enum ControlEvent<T> {
    /// The settling delay of a scheduled query elapsed.
    SettleExpired(TimerId),
    /// A lookup finished.
    Resolved {
        token: RequestToken,
        result: std::result::Result<Vec<T>, SelectError>,
    },
    /// A pointer press landed outside the control while it was open.
    ///
    /// Carries the interaction session the press was observed in; a later
    /// focus or keystroke supersedes it.
    Dismiss { session: u64 },
}

/// A candidate as it should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    pub key: ItemKey,
    pub label: String,
}

/// A searchable selection control.
pub struct Combobox<S: CandidateSource> {
    source: S,
    options: ControlOptions,
    state: ControlState<S::Item>,
    selection: Option<ItemKey>,
    tokens: RequestTokens,
    settle: DelayedCommit<String>,
    events: EventQueue<ControlEvent<S::Item>>,
    detector: OutsideClickDetector,
    runtime: Handle,

    /// Emitted once per activation with the chosen candidate.
    pub activated: Signal<S::Item>,
    /// Emitted when the selection is cleared from the control.
    pub cleared: Signal<()>,
}

impl<S: CandidateSource> Combobox<S> {
    /// Mount a control on the current Tokio runtime.
    ///
    /// The control subscribes to `pointer` once, for its whole life.
    ///
    /// # Errors
    ///
    /// [`CoreError::NoRuntime`] when called outside a runtime.
    pub fn mount(source: S, options: ControlOptions, pointer: &PointerEvents) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| CoreError::NoRuntime)?;
        let events = EventQueue::new();

        let settle_poster = events.poster();
        let settle = DelayedCommit::new(runtime.clone(), move |id| {
            settle_poster.post(ControlEvent::SettleExpired(id));
        });

        let dismiss_poster = events.poster();
        let detector = OutsideClickDetector::attach(pointer, move |session| {
            dismiss_poster.post(ControlEvent::Dismiss { session });
        });

        let mut control = Self {
            source,
            options,
            state: ControlState::default(),
            selection: None,
            tokens: RequestTokens::default(),
            settle,
            events,
            detector,
            runtime,
            activated: Signal::new(),
            cleared: Signal::new(),
        };
        control.commit_query(String::new());

        tracing::debug!(
            target: "terra_select::combobox",
            kind = ?control.kind(),
            min_chars = control.options.min_chars,
            "control mounted"
        );
        Ok(control)
    }

    /// Tear the control down.
    ///
    /// The pending settle is cancelled, the pointer subscription released
    /// and outstanding lookups can no longer reach the control.
    pub fn unmount(self) {}

    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &ControlOptions {
        &self.options
    }

    pub fn placeholder(&self) -> &str {
        &self.options.placeholder
    }

    pub fn state(&self) -> &ControlState<S::Item> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    pub fn committed_query(&self) -> &str {
        &self.state.committed_query
    }

    pub fn candidates(&self) -> &[S::Item] {
        &self.state.candidates
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Check whether a keystroke is still waiting for its settling delay.
    pub fn is_settling(&self) -> bool {
        self.settle.is_pending()
    }

    /// Text the input shows: the live query, else the selected label.
    pub fn display_text(&self) -> &str {
        if !self.state.query.is_empty() {
            return &self.state.query;
        }
        self.state.selected_label.as_deref().unwrap_or("")
    }

    pub fn display_state(&self) -> DisplayState {
        if !self.state.is_open {
            DisplayState::Closed
        } else if !meets_threshold(&self.state.query, self.options.min_chars) {
            DisplayState::Prompt
        } else if self.state.is_loading {
            DisplayState::Loading
        } else if self.state.candidates.is_empty() {
            DisplayState::NoMatches
        } else {
            DisplayState::Results
        }
    }

    /// The informational line of the dropdown, if it shows one.
    pub fn status_text(&self) -> Option<String> {
        match self.display_state() {
            DisplayState::Prompt => Some(self.kind().prompt_text(self.options.min_chars)),
            DisplayState::Loading => Some(LOADING_TEXT.to_string()),
            DisplayState::NoMatches => Some(self.kind().empty_text().to_string()),
            DisplayState::Closed | DisplayState::Results => None,
        }
    }

    /// Candidates with their labels and row keys.
    pub fn candidate_rows(&self) -> Vec<CandidateRow> {
        self.state
            .candidates
            .iter()
            .enumerate()
            .map(|(position, item)| CandidateRow {
                key: self.source.item_key(item, position),
                label: self.source.label(item),
            })
            .collect()
    }

    /// The input received focus.
    pub fn focus(&mut self) {
        self.set_open(true);
    }

    /// The chevron was pressed.
    pub fn toggle(&mut self) {
        self.set_open(!self.state.is_open);
    }

    /// The input text changed.
    pub fn set_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.query.clone_from(&text);
        self.set_open(true);

        match self.kind() {
            SourceKind::Remote => {
                let id = self.settle.schedule(text, DEFAULT_SETTLE_DELAY);
                tracing::trace!(target: "terra_select::combobox", %id, "query settling");
            }
            SourceKind::Local => self.commit_query(text),
        }
    }

    /// Choose the candidate at `index`.
    ///
    /// Returns `false`, and changes nothing, when the dropdown is closed or
    /// `index` is out of range.
    pub fn activate(&mut self, index: usize) -> bool {
        if !self.state.is_open {
            return false;
        }
        let Some(item) = self.state.candidates.get(index).cloned() else {
            return false;
        };

        let label = self.source.label(&item);
        if self.kind() == SourceKind::Local {
            self.selection = Some(self.source.item_key(&item, index));
            self.state.selected_label = Some(label.clone());
        }
        self.set_open(false);
        self.reset_query();

        tracing::debug!(target: "terra_select::combobox", %label, "candidate activated");
        self.activated.emit(item);
        true
    }

    /// Bind the control to the screen rectangles it occupies.
    ///
    /// Pointer presses outside all of them dismiss the open dropdown.
    pub fn set_region(&mut self, rects: Vec<Rect>) {
        self.detector.set_region(rects);
    }

    pub fn region(&self) -> Vec<Rect> {
        self.detector.region()
    }

    /// Change the source, then re-resolve the live query if it is local.
    pub fn update_source(&mut self, update: impl FnOnce(&mut S)) {
        update(&mut self.source);
        if self.kind() == SourceKind::Local {
            self.commit_query(self.state.query.clone());
        }
    }

    /// Apply every queued event without waiting.
    ///
    /// Returns the number of events applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.events.try_next() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for one event and apply it.
    pub async fn process_next(&mut self) -> bool {
        match self.events.next().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => false,
        }
    }

    /// Apply events until no settle or lookup is outstanding.
    pub async fn run_until_settled(&mut self) {
        while self.settle.is_pending() || self.state.is_loading {
            if !self.process_next().await {
                break;
            }
        }
        self.process_pending();
    }

    fn apply(&mut self, event: ControlEvent<S::Item>) {
        let _span = tracing::trace_span!(target: targets::COMBOBOX, span_names::COMBOBOX_EVENT).entered();
        match event {
            ControlEvent::SettleExpired(id) => match self.settle.take_expired(id) {
                Ok(query) => self.commit_query(query),
                Err(_) => {
                    tracing::trace!(target: "terra_select::combobox", %id, "stale settle ignored");
                }
            },
            ControlEvent::Resolved { token, result } => self.resolve_lookup(token, result),
            ControlEvent::Dismiss { session } => {
                if session != self.detector.session() {
                    tracing::trace!(target: "terra_select::combobox", session, "superseded dismissal ignored");
                } else if self.state.is_open {
                    tracing::debug!(target: "terra_select::combobox", "dismissed by outside interaction");
                    self.set_open(false);
                    self.reset_query();
                }
            }
        }
    }

    fn resolve_lookup(
        &mut self,
        token: RequestToken,
        result: std::result::Result<Vec<S::Item>, SelectError>,
    ) {
        if !self.tokens.is_current(token) {
            tracing::debug!(target: "terra_select::combobox", %token, "discarding stale lookup");
            return;
        }

        self.state.is_loading = false;
        self.state.candidates = match result {
            Ok(items) => {
                tracing::debug!(
                    target: "terra_select::combobox",
                    %token,
                    count = items.len(),
                    "lookup committed"
                );
                items
            }
            Err(err) => {
                tracing::warn!(
                    target: "terra_select::combobox",
                    %token,
                    query = %self.state.committed_query,
                    error = %err,
                    "lookup failed; showing no results"
                );
                Vec::new()
            }
        };
    }

    /// Resolve `query` and make it the committed query.
    fn commit_query(&mut self, query: String) {
        self.state.committed_query = query;

        match self
            .source
            .resolve(&self.state.committed_query, self.options.min_chars)
        {
            Resolution::Ready(items) => {
                self.tokens.invalidate();
                self.state.is_loading = false;
                self.state.candidates = items;
            }
            Resolution::Pending(lookup) => {
                let token = self.tokens.issue();
                self.state.is_loading = true;
                tracing::debug!(
                    target: "terra_select::combobox",
                    %token,
                    query = %self.state.committed_query,
                    "lookup issued"
                );

                let poster = self.events.poster();
                let span = tracing::debug_span!(target: targets::COMBOBOX, span_names::REMOTE_LOOKUP, %token);
                self.runtime.spawn(
                    async move {
                        let result = lookup.await;
                        if !poster.post(ControlEvent::Resolved { token, result }) {
                            tracing::trace!(target: "terra_select::combobox", "control gone; lookup dropped");
                        }
                    }
                    .instrument(span),
                );
            }
        }
    }

    /// Discard the transient query and whatever was resolved for it.
    fn reset_query(&mut self) {
        self.settle.cancel();
        self.state.query.clear();
        self.commit_query(String::new());
    }

    fn set_open(&mut self, open: bool) {
        if self.state.is_open != open {
            tracing::debug!(target: "terra_select::combobox", open, "open state changed");
        }
        self.state.is_open = open;
        self.detector.set_open(open);
    }
}

impl Combobox<LocalSource> {
    /// Replace the item list, keeping the current selection if it still exists.
    pub fn set_items(&mut self, items: Vec<LocalItem>) {
        self.update_source(|source| source.set_items(items));
        self.relabel_selection();
    }

    /// Sync the selection held by the form.
    ///
    /// An empty `value` means nothing is selected.
    pub fn set_current_value(&mut self, value: &str) {
        self.selection = (!value.is_empty()).then(|| ItemKey::Value(value.to_string()));
        self.relabel_selection();
    }

    /// The selected value, if any.
    pub fn current_value(&self) -> Option<&str> {
        match &self.selection {
            Some(ItemKey::Value(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The clear button was pressed.
    ///
    /// Resets selection and input text; the dropdown stays as it is.
    pub fn clear(&mut self) {
        self.selection = None;
        self.state.selected_label = None;
        self.state.query.clear();
        self.commit_query(String::new());

        tracing::debug!(target: "terra_select::combobox", "selection cleared");
        self.cleared.emit(());
    }

    fn relabel_selection(&mut self) {
        let label = self
            .current_value()
            .and_then(|value| self.source.label_for(value))
            .map(str::to_string);
        self.state.selected_label = label;
    }
}

impl<S: CandidateSource> Drop for Combobox<S> {
    fn drop(&mut self) {
        self.settle.cancel();
        self.events.close();
        self.activated.disconnect_all();
        self.cleared.disconnect_all();
        tracing::debug!(target: "terra_select::combobox", kind = ?self.source.kind(), "control unmounted");
    }
}

impl<S> std::fmt::Debug for Combobox<S>
where
    S: CandidateSource + std::fmt::Debug,
    S::Item: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combobox")
            .field("source", &self.source)
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
