//! Pointer-down event stream.
//!
//! The host feeds every pointer press it sees into a [`PointerEvents`]
//! stream; controls observe it read-only through a [`PointerSubscription`].
//! A subscription is released exactly once, when it is dropped.
//!
//! [`PointerEvents::global`] is the process-wide stream. Hosts that embed
//! several independent surfaces, and tests, can create their own streams
//! with [`PointerEvents::new`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use terra_select_core::{Point, PointerButton, PointerDownEvent, PointerEvents};
//!
//! let pointer = Arc::new(PointerEvents::new());
//! let presses = Arc::new(AtomicUsize::new(0));
//!
//! let presses_clone = presses.clone();
//! let subscription = pointer.subscribe(move |_event| {
//!     presses_clone.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! pointer.pointer_down(PointerDownEvent::new(Point::new(4.0, 8.0), PointerButton::Primary));
//! drop(subscription);
//! pointer.pointer_down(PointerDownEvent::new(Point::new(4.0, 8.0), PointerButton::Primary));
//!
//! assert_eq!(presses.load(Ordering::SeqCst), 1);
//! ```

use std::sync::{Arc, OnceLock};

use crate::geometry::Point;
use crate::signal::{ConnectionGuard, ConnectionId, Signal};

static GLOBAL_POINTER: OnceLock<Arc<PointerEvents>> = OnceLock::new();

/// Pointer button that caused a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Primary button (usually left, or a touch contact).
    #[default]
    Primary,
    /// Secondary button (usually right).
    Secondary,
    /// Middle button (scroll wheel click).
    Middle,
}

/// A pointer press at a position in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDownEvent {
    pub position: Point,
    pub button: PointerButton,
}

impl PointerDownEvent {
    pub fn new(position: Point, button: PointerButton) -> Self {
        Self { position, button }
    }
}

/// A stream of pointer-down events.
pub struct PointerEvents {
    pressed: Arc<Signal<PointerDownEvent>>,
}

impl PointerEvents {
    /// Create an independent stream.
    pub fn new() -> Self {
        Self {
            pressed: Arc::new(Signal::new()),
        }
    }

    /// The process-wide stream.
    pub fn global() -> Arc<PointerEvents> {
        GLOBAL_POINTER
            .get_or_init(|| Arc::new(PointerEvents::new()))
            .clone()
    }

    /// Observe pointer presses until the returned subscription is dropped.
    pub fn subscribe<F>(&self, slot: F) -> PointerSubscription
    where
        F: Fn(&PointerDownEvent) + Send + Sync + 'static,
    {
        let guard = self.pressed.connect_scoped(slot);
        tracing::debug!(
            target: "terra_select::pointer",
            subscribers = self.subscriber_count(),
            "pointer subscription acquired"
        );
        PointerSubscription { guard }
    }

    /// Deliver a pointer press to every subscriber.
    pub fn pointer_down(&self, event: PointerDownEvent) {
        tracing::trace!(
            target: "terra_select::pointer",
            x = event.position.x,
            y = event.position.y,
            button = ?event.button,
            "pointer down"
        );
        self.pressed.emit(event);
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.pressed.connection_count()
    }
}

impl Default for PointerEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PointerEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerEvents")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// A live observation of a [`PointerEvents`] stream.
///
/// Dropping the subscription unsubscribes. It never keeps the stream alive.
#[derive(Debug)]
pub struct PointerSubscription {
    guard: ConnectionGuard<PointerDownEvent>,
}

impl PointerSubscription {
    /// The underlying connection ID.
    pub fn id(&self) -> ConnectionId {
        self.guard.id()
    }

    /// Check whether the stream still exists.
    pub fn is_active(&self) -> bool {
        self.guard.is_signal_alive()
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        tracing::debug!(target: "terra_select::pointer", id = ?self.guard.id(), "pointer subscription released");
    }
}
