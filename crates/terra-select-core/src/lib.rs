//! Core systems for terra-select.
//!
//! This crate provides the building blocks the selection controls are made of:
//!
//! - **Signal/Slot System**: Type-safe notification from a control to its form
//! - **Delayed Commit**: A restartable, cancellable settling delay
//! - **Event Queue**: Owner-side application of asynchronous completions
//! - **Pointer Stream**: Pointer-down events observed through scoped subscriptions
//! - **Geometry**: Points and rectangles for hit testing
//!
//! # Signal/Slot Example
//!
//! ```
//! use terra_select_core::Signal;
//!
//! let activated = Signal::<String>::new();
//!
//! let conn_id = activated.connect(|value| {
//!     println!("Selected: {}", value);
//! });
//!
//! activated.emit("rice".to_string());
//! activated.disconnect(conn_id);
//! ```
//!
//! # Delayed Commit Example
//!
//! ```
//! use terra_select_core::{DelayedCommit, EventQueue, DEFAULT_SETTLE_DELAY};
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let mut queue = EventQueue::new();
//! let poster = queue.poster();
//! let mut settle = DelayedCommit::new(tokio::runtime::Handle::current(), move |id| {
//!     poster.post(id);
//! });
//!
//! for query in ["K", "Ku", "Kur"] {
//!     settle.schedule(query.to_string(), DEFAULT_SETTLE_DELAY);
//! }
//!
//! let expired = queue.next().await.unwrap();
//! assert_eq!(settle.take_expired(expired).unwrap(), "Kur");
//! # }
//! ```

pub mod error;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod pointer;
pub mod signal;
pub mod timer;

pub use error::{CoreError, Result, SignalError, TimerError};
pub use event::{EventPoster, EventQueue};
pub use geometry::{Point, Rect, Size};
pub use pointer::{PointerButton, PointerDownEvent, PointerEvents, PointerSubscription};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{DEFAULT_SETTLE_DELAY, DelayedCommit, TimerId};
