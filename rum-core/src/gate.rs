use std::cell::Cell;
use std::rc::Rc;

use crate::host::{DocumentLifecycle, Scheduler};

/// Defers work until the document has fully loaded.
///
/// Navigation timing is only final one turn after the document reports
/// `complete`, so the callback is always handed to the scheduler rather than
/// run in place, even when the document is already complete at install time.
/// The callback runs at most once.
#[derive(Debug)]
pub struct ReadinessGate {
    open: Rc<Cell<bool>>,
}

impl ReadinessGate {
    /// Installs the gate on `host` and returns a handle to observe it.
    pub fn install<H, F>(host: &Rc<H>, callback: F) -> ReadinessGate
    where
        H: DocumentLifecycle + Scheduler + ?Sized + 'static,
        F: FnOnce() + 'static,
    {
        let open = Rc::new(Cell::new(false));

        if host.ready_state().is_complete() {
            open.set(true);
            host.schedule(Box::new(callback));
        } else {
            let weak_host = Rc::downgrade(host);
            let gate_open = open.clone();
            let mut pending = Some(callback);
            host.on_ready_state_change(Box::new(move || {
                let host = match weak_host.upgrade() {
                    Some(host) => host,
                    None => return,
                };
                if !host.ready_state().is_complete() {
                    return;
                }
                if let Some(callback) = pending.take() {
                    gate_open.set(true);
                    host.schedule(Box::new(callback));
                }
            }));
        }

        ReadinessGate { open }
    }

    /// Returns `true` once the callback has been scheduled.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestPage;
    use crate::types::ReadyState;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let calls = Rc::new(Cell::new(0));
        let inner = calls.clone();
        (calls, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn test_complete_document_defers_one_turn() {
        let page = TestPage::loaded("https://example.com/");
        let (calls, callback) = counter();
        let gate = ReadinessGate::install(&page, callback);

        assert!(gate.is_open());
        assert_eq!(calls.get(), 0);
        assert_eq!(page.run_next_turn(), 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_waits_for_complete() {
        let page = TestPage::new("https://example.com/");
        let (calls, callback) = counter();
        let gate = ReadinessGate::install(&page, callback);

        page.set_ready_state(ReadyState::Interactive);
        assert!(!gate.is_open());
        assert_eq!(page.pending_tasks(), 0);

        page.set_ready_state(ReadyState::Complete);
        assert!(gate.is_open());
        assert_eq!(calls.get(), 0);

        page.run_until_idle();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_fires_once() {
        let page = TestPage::new("https://example.com/");
        let (calls, callback) = counter();
        ReadinessGate::install(&page, callback);

        page.set_ready_state(ReadyState::Complete);
        page.set_ready_state(ReadyState::Complete);
        page.set_ready_state(ReadyState::Complete);
        assert_eq!(page.pending_tasks(), 1);
        page.run_until_idle();
        assert_eq!(calls.get(), 1);
    }
}
