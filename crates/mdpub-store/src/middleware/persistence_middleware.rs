//! Persistence Middleware
//!
//! After the inner chain ran, and once the cycle commits, hands the committed
//! tree to the debounced persistence worker when the action belongs to a
//! persisted slice and changed something. The worker writes every persisted
//! slice together.

use mdpub_config::Storage;
use std::sync::Arc;
use std::time::Duration;

use crate::actions::Action;
use crate::error::StoreError;
use crate::middleware::{Middleware, MiddlewareContext, Next};
use crate::persistence::{PersistWorker, PersistenceHandle};
use crate::state::SliceName;

pub struct PersistenceMiddleware {
    slices: Vec<SliceName>,
    worker: PersistWorker,
}

impl PersistenceMiddleware {
    pub fn new(storage: Arc<dyn Storage>, slices: Vec<SliceName>, debounce: Duration) -> Self {
        let worker = PersistWorker::spawn(storage, slices.clone(), debounce);
        Self { slices, worker }
    }

    /// Handle for flushing pending writes from outside the store
    pub fn persistence_handle(&self) -> PersistenceHandle {
        self.worker.handle()
    }
}

impl Middleware for PersistenceMiddleware {
    fn name(&self) -> &'static str {
        "persistence"
    }

    fn handle(
        &mut self,
        action: &Action,
        ctx: &mut MiddlewareContext,
        next: &mut Next<'_>,
    ) -> Result<(), StoreError> {
        if !self.slices.contains(&action.slice()) {
            return next.run(action, ctx);
        }

        let before = ctx.state().clone();
        next.run(action, ctx)?;

        if !ctx.state().changed_slices(&before).is_empty() {
            let handle = self.worker.handle();
            ctx.after_commit(move |committed| handle.schedule(committed.clone()));
        }
        Ok(())
    }
}
