use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

use crate::host::{Scheduler, Task};

/// A single-threaded run queue that executes tasks turn by turn.
///
/// A turn runs the tasks that were queued when it started. Anything scheduled
/// while a turn is running waits for the next one, which is what separates
/// "later" from "now" for the readiness gate.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use rum_core::{Scheduler, TurnQueue};
///
/// let queue = TurnQueue::new();
/// let ran = Rc::new(Cell::new(false));
/// let flag = ran.clone();
/// queue.schedule(Box::new(move || flag.set(true)));
/// assert!(!ran.get());
/// queue.run_until_idle();
/// assert!(ran.get());
/// ```
#[derive(Default)]
pub struct TurnQueue {
    tasks: RefCell<VecDeque<Task>>,
}

impl TurnQueue {
    /// Creates an empty queue.
    pub fn new() -> TurnQueue {
        TurnQueue::default()
    }

    /// The number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Runs one turn and returns how many tasks ran.
    pub fn run_next_turn(&self) -> usize {
        let due = self.pending();
        let mut ran = 0;
        while ran < due {
            let task = self.tasks.borrow_mut().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
            ran += 1;
        }
        ran
    }

    /// Runs turns until nothing is queued and returns how many tasks ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.pending() > 0 {
            ran += self.run_next_turn();
        }
        ran
    }
}

impl Scheduler for TurnQueue {
    fn schedule(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for TurnQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnQueue")
            .field("pending", &self.pending())
            .finish()
    }
}
