//! Dispatcher for middleware action dispatch
//!
//! Middleware cannot call back into the store while a dispatch is running.
//! Actions dispatched here are queued for the current cycle. After the cycle
//! commits, the store dispatches them in FIFO order and each one goes through
//! the full middleware chain again. If the cycle fails the queue is dropped.

use crate::actions::Action;

/// Per-cycle queue of follow-up actions
#[derive(Debug, Default)]
pub struct Dispatcher {
    queue: Vec<Action>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action to be dispatched after the current cycle
    pub fn dispatch(&mut self, action: Action) {
        self.queue.push(action);
    }

    /// Number of actions waiting for the end of the cycle
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn drain(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.queue)
    }
}
