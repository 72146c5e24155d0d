//! Deferred work.
//!
//! Event handlers may hand a task to the [`Scheduler`] to run on the host's
//! next turn. Tasks are fire-and-forget: there is no cancellation.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    fn defer(&self, task: Task);
}

/// Explicit single-threaded task queue. `run_pending` is one turn of the
/// host loop.
#[derive(Clone, Default)]
pub struct TickQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run every task queued before this call. Tasks queued while draining
    /// wait for the next turn. Returns the number of tasks run.
    pub fn run_pending(&self) -> usize {
        let batch = std::mem::take(&mut *self.tasks.borrow_mut());
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }
}

impl Scheduler for TickQueue {
    fn defer(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl std::fmt::Debug for TickQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn tasks_run_on_next_turn_in_order() {
        let queue = TickQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let log = log.clone();
            queue.defer(Box::new(move || log.borrow_mut().push(i)));
        }
        assert!(log.borrow().is_empty());
        assert_eq!(queue.pending(), 3);

        assert_eq!(queue.run_pending(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn tasks_queued_while_draining_wait_a_turn() {
        let queue = TickQueue::new();
        let hits = Rc::new(Cell::new(0));

        let inner_queue = queue.clone();
        let inner_hits = hits.clone();
        queue.defer(Box::new(move || {
            inner_hits.set(inner_hits.get() + 1);
            let again = inner_hits.clone();
            inner_queue.defer(Box::new(move || again.set(again.get() + 10)));
        }));

        assert_eq!(queue.run_pending(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(queue.run_pending(), 1);
        assert_eq!(hits.get(), 11);
    }
}
