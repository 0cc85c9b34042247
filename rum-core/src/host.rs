//! The capabilities the agent needs from the page it runs in.
//!
//! A browser provides all of them natively; other hosts can back them with
//! polling or push-based sensors. Everything here is single-threaded:
//! callbacks are plain boxed closures and are invoked one at a time.

use crate::types::{EntryType, PerformanceEntry, ReadyState, VisibilityState};
use crate::Error;

/// Receives one batch of timeline records.
pub type RecordCallback = Box<dyn FnMut(Vec<PerformanceEntry>)>;

/// A notification handler without arguments.
pub type Listener = Box<dyn FnMut()>;

/// A unit of work for the scheduler.
pub type Task = Box<dyn FnOnce()>;

/// Access to the performance timeline.
pub trait PerformanceSource {
    /// Subscribes to one stream of timeline records.
    ///
    /// With `buffered` set the subscription also receives records that were
    /// added before it was established. A host that cannot observe the type
    /// returns [`Error::Unsupported`] and never calls `on_records`.
    fn observe(
        &self,
        entry_type: EntryType,
        buffered: bool,
        on_records: RecordCallback,
    ) -> Result<(), Error>;

    /// Returns the records of one type currently on the timeline.
    fn entries_by_type(&self, entry_type: EntryType) -> Vec<PerformanceEntry>;
}

/// Access to the document's lifecycle.
pub trait DocumentLifecycle {
    /// The address of the current page.
    fn url(&self) -> String;

    /// The current loading state.
    fn ready_state(&self) -> ReadyState;

    /// Registers a listener invoked on every ready state change.
    fn on_ready_state_change(&self, listener: Listener);

    /// The current visibility.
    fn visibility_state(&self) -> VisibilityState;

    /// Registers a listener invoked on every visibility change.
    fn on_visibility_change(&self, listener: Listener);
}

/// A cooperative scheduler.
pub trait Scheduler {
    /// Runs `task` on a later turn, never synchronously.
    fn schedule(&self, task: Task);
}

/// Everything the agent needs from its page.
pub trait Host: PerformanceSource + DocumentLifecycle + Scheduler {}

impl<T: PerformanceSource + DocumentLifecycle + Scheduler> Host for T {}
