//! Per-control event queue.
//!
//! Work that completes on the runtime (timer expiry, remote responses,
//! pointer dismissals) is never applied from the completing task. It is
//! posted to an [`EventQueue`] and the owner drains the queue on its own
//! side, so all state changes happen in one place and in posting order.

use tokio::sync::mpsc;

/// Receiving side of a control's event queue.
#[derive(Debug)]
pub struct EventQueue<E> {
    tx: mpsc::UnboundedSender<E>,
    rx: mpsc::UnboundedReceiver<E>,
}

/// Cloneable posting handle for an [`EventQueue`].
#[derive(Debug)]
pub struct EventPoster<E> {
    tx: mpsc::UnboundedSender<E>,
}

impl<E> Clone for EventPoster<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E> EventQueue<E> {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Create a posting handle for this queue.
    pub fn poster(&self) -> EventPoster<E> {
        EventPoster {
            tx: self.tx.clone(),
        }
    }

    /// Take the next event without waiting.
    pub fn try_next(&mut self) -> Option<E> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event.
    ///
    /// The queue keeps one sender alive for itself, so this only returns
    /// `None` after [`close`](Self::close).
    pub async fn next(&mut self) -> Option<E> {
        self.rx.recv().await
    }

    /// Number of events waiting to be taken.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Check whether no events are waiting.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Stop accepting events. Posts made afterwards return `false`.
    ///
    /// Events already queued are discarded.
    pub fn close(&mut self) {
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventPoster<E> {
    /// Post an event.
    ///
    /// Returns `false` if the queue has been closed or dropped; the event is
    /// discarded in that case.
    pub fn post(&self, event: E) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Check whether the queue is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
