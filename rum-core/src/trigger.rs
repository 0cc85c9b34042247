use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::host::DocumentLifecycle;
use crate::types::{MetricSnapshot, VisibilityState};

/// Receives the snapshot when the page is hidden for the first time.
pub type FlushCallback = Box<dyn FnOnce(&MetricSnapshot)>;

/// The two states of a [`FlushTrigger`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlushState {
    /// Waiting for the page to become hidden.
    Armed,
    /// The snapshot was flushed. Terminal.
    Fired,
}

/// Flushes the snapshot exactly once, the first time the page is hidden.
///
/// Becoming hidden is the last moment the page is guaranteed to still run
/// code, so it stands in for "the page view is over". Whatever the snapshot
/// holds at that moment is what gets flushed; later updates are never sent.
pub struct FlushTrigger {
    state: Cell<FlushState>,
    snapshot: Rc<RefCell<MetricSnapshot>>,
    on_flush: RefCell<Option<FlushCallback>>,
}

impl FlushTrigger {
    /// Creates an armed trigger that is not yet attached to a page.
    pub fn new<F>(snapshot: Rc<RefCell<MetricSnapshot>>, on_flush: F) -> FlushTrigger
    where
        F: FnOnce(&MetricSnapshot) + 'static,
    {
        let on_flush: FlushCallback = Box::new(on_flush);
        FlushTrigger {
            state: Cell::new(FlushState::Armed),
            snapshot,
            on_flush: RefCell::new(Some(on_flush)),
        }
    }

    /// Creates a trigger and subscribes it to the page's visibility changes.
    pub fn arm<H, F>(host: &Rc<H>, snapshot: Rc<RefCell<MetricSnapshot>>, on_flush: F) -> Rc<FlushTrigger>
    where
        H: DocumentLifecycle + ?Sized + 'static,
        F: FnOnce(&MetricSnapshot) + 'static,
    {
        let trigger = Rc::new(FlushTrigger::new(snapshot, on_flush));
        let weak_host = Rc::downgrade(host);
        let listener_trigger = trigger.clone();
        host.on_visibility_change(Box::new(move || {
            if let Some(host) = weak_host.upgrade() {
                listener_trigger.notify(host.visibility_state());
            }
        }));
        trigger
    }

    /// Handles one visibility notification.
    ///
    /// Returns `true` if this notification flushed the snapshot.
    pub fn notify(&self, visibility: VisibilityState) -> bool {
        if !visibility.is_hidden() || self.state.get() == FlushState::Fired {
            return false;
        }
        self.state.set(FlushState::Fired);

        let on_flush = self.on_flush.borrow_mut().take();
        if let Some(on_flush) = on_flush {
            match self.snapshot.try_borrow() {
                Ok(snapshot) => on_flush(&snapshot),
                Err(_) => rum_debug!("metric snapshot in use while flushing, payload dropped"),
            }
        }
        true
    }

    /// The current state.
    pub fn state(&self) -> FlushState {
        self.state.get()
    }
}

impl fmt::Debug for FlushTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlushTrigger")
            .field("state", &self.state.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_on_first_hidden() {
        let snapshot = Rc::new(RefCell::new(MetricSnapshot::new("https://example.com/")));
        let flushed = Rc::new(RefCell::new(Vec::new()));
        let sink = flushed.clone();
        let trigger = FlushTrigger::new(snapshot.clone(), move |snapshot: &MetricSnapshot| {
            sink.borrow_mut().push(snapshot.clone())
        });

        assert!(!trigger.notify(VisibilityState::Visible));
        assert_eq!(trigger.state(), FlushState::Armed);

        snapshot.borrow_mut().record_lcp(900.0);
        assert!(trigger.notify(VisibilityState::Hidden));
        assert_eq!(trigger.state(), FlushState::Fired);

        snapshot.borrow_mut().record_lcp(1500.0);
        assert!(!trigger.notify(VisibilityState::Visible));
        assert!(!trigger.notify(VisibilityState::Hidden));

        let flushed = flushed.borrow();
        assert_eq!(flushed.len(), 1);
        assert_eq!(flushed[0].lcp, 900.0);
    }

    #[test]
    fn test_busy_snapshot_spends_the_flush() {
        let snapshot = Rc::new(RefCell::new(MetricSnapshot::new("https://example.com/")));
        let flushed = Rc::new(Cell::new(0));
        let sink = flushed.clone();
        let trigger = FlushTrigger::new(snapshot.clone(), move |_: &MetricSnapshot| {
            sink.set(sink.get() + 1)
        });

        {
            let _writer = snapshot.borrow_mut();
            assert!(trigger.notify(VisibilityState::Hidden));
        }
        assert_eq!(trigger.state(), FlushState::Fired);
        assert_eq!(flushed.get(), 0);

        assert!(!trigger.notify(VisibilityState::Hidden));
        assert_eq!(flushed.get(), 0);
    }
}
