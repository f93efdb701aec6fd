//! Outside-interaction detection.
//!
//! One [`OutsideClickDetector`] is attached per mounted control. It holds a
//! single subscription to the pointer stream for its whole life and is gated
//! by the control's open flag, so opening and closing never subscribe or
//! unsubscribe anything.
//!
//! Every call to [`OutsideClickDetector::set_open`] with `true` starts a new
//! interaction session. A dismissal reports the session it was observed in,
//! so the owner can ignore one that a later interaction has superseded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use terra_select_core::{Point, PointerEvents, PointerSubscription, Rect};

/// Calls back when a pointer press lands outside a bound region while open.
#[derive(Debug)]
pub struct OutsideClickDetector {
    open: Arc<AtomicBool>,
    session: Arc<AtomicU64>,
    region: Arc<Mutex<Vec<Rect>>>,
    _subscription: PointerSubscription,
}

impl OutsideClickDetector {
    /// Subscribe to `pointer`; `on_dismiss` runs on the thread delivering the
    /// press and receives the session the press belongs to.
    pub fn attach<F>(pointer: &PointerEvents, on_dismiss: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        let open = Arc::new(AtomicBool::new(false));
        let session = Arc::new(AtomicU64::new(0));
        let region: Arc<Mutex<Vec<Rect>>> = Arc::new(Mutex::new(Vec::new()));

        let open_flag = open.clone();
        let current_session = session.clone();
        let bounds = region.clone();
        let subscription = pointer.subscribe(move |event| {
            if !open_flag.load(Ordering::Acquire) {
                return;
            }
            if is_outside(&bounds.lock(), event.position) {
                tracing::debug!(
                    target: "terra_select::combobox",
                    x = event.position.x,
                    y = event.position.y,
                    "pointer down outside control"
                );
                on_dismiss(current_session.load(Ordering::Acquire));
            }
        });

        Self {
            open,
            session,
            region,
            _subscription: subscription,
        }
    }

    pub fn set_open(&self, open: bool) {
        if open {
            self.session.fetch_add(1, Ordering::AcqRel);
        }
        self.open.store(open, Ordering::Release);
    }

    /// The current interaction session.
    pub fn session(&self) -> u64 {
        self.session.load(Ordering::Acquire)
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Replace the bound region (input, chevron, dropdown, ...).
    pub fn set_region(&self, rects: Vec<Rect>) {
        *self.region.lock() = rects;
    }

    pub fn region(&self) -> Vec<Rect> {
        self.region.lock().clone()
    }

    /// Check whether a press at `point` would dismiss the control.
    pub fn is_outside(&self, point: Point) -> bool {
        is_outside(&self.region.lock(), point)
    }
}

/// A region with no rectangles has not been laid out yet and has no outside.
fn is_outside(region: &[Rect], point: Point) -> bool {
    !region.is_empty() && !region.iter().any(|rect| rect.contains(point))
}
