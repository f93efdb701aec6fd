//! Delayed-commit timer for terra-select.
//!
//! A [`DelayedCommit`] holds at most one pending value behind a settling
//! delay. Scheduling a new value replaces the pending one and restarts the
//! delay; only a value that survives the whole delay uninterrupted is ever
//! handed back to the owner.
//!
//! Expiry is a two-step handshake so that the owner stays in control of when
//! state changes happen:
//!
//! 1. The delay elapses on the Tokio runtime and the notifier given to
//!    [`DelayedCommit::new`] is called with the [`TimerId`].
//! 2. The owner calls [`DelayedCommit::take_expired`] with that ID. The value
//!    is returned exactly once, and only if the ID still belongs to the
//!    current pending commit.
//!
//! Stale notifications (for commits that were replaced or cancelled after the
//! delay already elapsed) are therefore rejected by step 2.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use terra_select_core::{DelayedCommit, EventQueue};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut queue = EventQueue::new();
//! let poster = queue.poster();
//! let mut timer = DelayedCommit::new(tokio::runtime::Handle::current(), move |id| {
//!     poster.post(id);
//! });
//!
//! timer.schedule("Ku".to_string(), Duration::from_millis(300));
//! timer.schedule("Kurnool".to_string(), Duration::from_millis(300));
//!
//! let id = queue.next().await.unwrap();
//! assert_eq!(timer.take_expired(id).unwrap(), "Kurnool");
//! # }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::TimerError;

/// Default settling delay between the last keystroke and the committed query.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Identifies one scheduled commit of a [`DelayedCommit`].
///
/// IDs are strictly increasing per timer, so a newer schedule always
/// carries a larger ID than every earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// The raw sequence number.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Callback invoked on the runtime when a pending commit's delay elapses.
type ExpiryNotifier = Arc<dyn Fn(TimerId) + Send + Sync>;

/// The currently pending commit.
struct PendingCommit<T> {
    id: TimerId,
    value: T,
    task: JoinHandle<()>,
}

/// A cancellable, restartable settling delay around a single value.
pub struct DelayedCommit<T> {
    pending: Option<PendingCommit<T>>,
    last_id: u64,
    runtime: Handle,
    notifier: ExpiryNotifier,
}

impl<T> DelayedCommit<T> {
    /// Create a timer that spawns its delays on `runtime` and reports expiry
    /// through `on_expired`.
    pub fn new<F>(runtime: Handle, on_expired: F) -> Self
    where
        F: Fn(TimerId) + Send + Sync + 'static,
    {
        Self {
            pending: None,
            last_id: 0,
            runtime,
            notifier: Arc::new(on_expired),
        }
    }

    /// Schedule `value` to be committed after `delay`.
    ///
    /// Any pending commit is cancelled first; its value is dropped and its
    /// ID will never be accepted by [`take_expired`](Self::take_expired).
    #[tracing::instrument(skip(self, value), target = "terra_select::timer", level = "trace")]
    pub fn schedule(&mut self, value: T, delay: Duration) -> TimerId {
        self.cancel();

        self.last_id += 1;
        let id = TimerId(self.last_id);
        let notifier = self.notifier.clone();
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::trace!(target: "terra_select::timer", %id, "settle delay elapsed");
            notifier(id);
        });

        self.pending = Some(PendingCommit { id, value, task });
        id
    }

    /// Cancel the pending commit, if any.
    ///
    /// Returns `true` if a commit was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.task.abort();
                tracing::trace!(target: "terra_select::timer", id = %pending.id, "pending commit cancelled");
                true
            }
            None => false,
        }
    }

    /// Check whether a commit is waiting for its delay to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The ID of the pending commit, if any.
    pub fn pending_id(&self) -> Option<TimerId> {
        self.pending.as_ref().map(|p| p.id)
    }

    /// The value of the pending commit, if any.
    pub fn pending_value(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    /// Take the value of an expired commit.
    ///
    /// Succeeds exactly once for the ID of the current pending commit;
    /// replaced, cancelled or already-taken IDs yield
    /// [`TimerError::InvalidTimerId`] and leave the timer untouched.
    pub fn take_expired(&mut self, id: TimerId) -> Result<T, TimerError> {
        match self.pending.take() {
            Some(pending) if pending.id == id => Ok(pending.value),
            other => {
                self.pending = other;
                Err(TimerError::InvalidTimerId)
            }
        }
    }
}

impl<T> Drop for DelayedCommit<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T: fmt::Debug> fmt::Debug for DelayedCommit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayedCommit")
            .field("pending_id", &self.pending_id())
            .field("pending_value", &self.pending_value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventQueue;

    fn timer_with_queue() -> (DelayedCommit<String>, EventQueue<TimerId>) {
        let queue = EventQueue::new();
        let poster = queue.poster();
        let timer = DelayedCommit::new(Handle::current(), move |id| {
            poster.post(id);
        });
        (timer, queue)
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_after_delay() {
        let (mut timer, mut queue) = timer_with_queue();

        let id = timer.schedule("rice".to_string(), DEFAULT_SETTLE_DELAY);
        assert!(timer.is_pending());
        assert_eq!(timer.pending_value().map(String::as_str), Some("rice"));

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(queue.try_next().is_none());

        tokio::time::sleep(Duration::from_millis(1)).await;
        let expired = queue.next().await.unwrap();
        assert_eq!(expired, id);
        assert_eq!(timer.take_expired(expired).unwrap(), "rice");
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_coalesces() {
        let (mut timer, mut queue) = timer_with_queue();

        let first = timer.schedule("K".to_string(), DEFAULT_SETTLE_DELAY);
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = timer.schedule("Ku".to_string(), DEFAULT_SETTLE_DELAY);
        tokio::time::sleep(Duration::from_millis(100)).await;
        let third = timer.schedule("Kur".to_string(), DEFAULT_SETTLE_DELAY);
        assert!(first < second && second < third);

        tokio::time::sleep(Duration::from_secs(1)).await;

        let expired = queue.next().await.unwrap();
        assert_eq!(expired, third);
        assert!(queue.try_next().is_none());
        assert_eq!(timer.take_expired(third).unwrap(), "Kur");
    }

    #[tokio::test(start_paused = true)]
    async fn test_take_expired_exactly_once() {
        let (mut timer, mut queue) = timer_with_queue();

        timer.schedule("wheat".to_string(), DEFAULT_SETTLE_DELAY);
        let id = queue.next().await.unwrap();

        assert!(timer.take_expired(id).is_ok());
        assert_eq!(timer.take_expired(id), Err(TimerError::InvalidTimerId));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_id_rejected_after_reschedule() {
        let (mut timer, mut queue) = timer_with_queue();

        let stale = timer.schedule("cot".to_string(), Duration::from_millis(10));
        // The delay elapses and the notification is queued...
        assert_eq!(queue.next().await, Some(stale));
        // ...but a newer keystroke arrives before the owner handles it.
        let fresh = timer.schedule("cotton".to_string(), Duration::from_millis(10));

        assert_eq!(timer.take_expired(stale), Err(TimerError::InvalidTimerId));
        assert_eq!(timer.pending_id(), Some(fresh));
        assert_eq!(queue.next().await, Some(fresh));
        assert_eq!(timer.take_expired(fresh).unwrap(), "cotton");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_notification() {
        let (mut timer, mut queue) = timer_with_queue();

        timer.schedule("soy".to_string(), DEFAULT_SETTLE_DELAY);
        assert!(timer.cancel());
        assert!(!timer.cancel());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(queue.try_next().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending() {
        let (mut timer, mut queue) = timer_with_queue();

        timer.schedule("potato".to_string(), DEFAULT_SETTLE_DELAY);
        drop(timer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(queue.try_next().is_none());
    }
}
