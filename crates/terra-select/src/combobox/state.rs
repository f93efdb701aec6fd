//! Control state and request tokens.

use std::fmt;

/// Tags a remote lookup so that only the newest one may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request#{}", self.0)
    }
}

/// Issues strictly increasing [`RequestToken`]s and remembers the newest.
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: u64,
}

impl RequestTokens {
    /// Allocate a token newer than every token issued so far.
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Make every issued token stale without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    /// Check whether `token` is the most recently issued one.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// Observable state of a combobox.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState<T> {
    /// Whether the dropdown is shown.
    pub is_open: bool,
    /// Live input text.
    pub query: String,
    /// The query the current candidates were resolved for.
    pub committed_query: String,
    /// Current candidate list, replaced wholesale on each resolution.
    pub candidates: Vec<T>,
    /// True while the lookup with the newest token is outstanding.
    pub is_loading: bool,
    /// Label of the selected value, for controls that display it.
    pub selected_label: Option<String>,
}

impl<T> Default for ControlState<T> {
    fn default() -> Self {
        Self {
            is_open: false,
            query: String::new(),
            committed_query: String::new(),
            candidates: Vec::new(),
            is_loading: false,
            selected_label: None,
        }
    }
}

/// What the dropdown is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayState {
    /// The dropdown is hidden.
    Closed,
    /// The query is shorter than the minimum length.
    Prompt,
    /// A remote lookup is outstanding.
    Loading,
    /// One or more candidates are listed.
    Results,
    /// A long-enough query matched nothing.
    NoMatches,
}

impl DisplayState {
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}
