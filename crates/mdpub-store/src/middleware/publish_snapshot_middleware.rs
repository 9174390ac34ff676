//! Publish Snapshot Middleware
//!
//! The publish slice is not debounced: every publish action that changes the
//! slice writes it to storage as soon as the dispatch commits. A failed write is logged and the
//! in-memory change stays committed.

use mdpub_config::Storage;
use std::sync::Arc;

use crate::actions::Action;
use crate::error::{self, StoreError};
use crate::middleware::{Middleware, MiddlewareContext, Next};
use crate::persistence::persist_slice;
use crate::state::SliceName;

pub struct PublishSnapshotMiddleware {
    storage: Arc<dyn Storage>,
}

impl PublishSnapshotMiddleware {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

impl Middleware for PublishSnapshotMiddleware {
    fn name(&self) -> &'static str {
        "publish-snapshot"
    }

    fn handle(
        &mut self,
        action: &Action,
        ctx: &mut MiddlewareContext,
        next: &mut Next<'_>,
    ) -> Result<(), StoreError> {
        if !matches!(action, Action::Publish(_)) {
            return next.run(action, ctx);
        }

        let before = Arc::clone(&ctx.state().publish);
        next.run(action, ctx)?;

        if !Arc::ptr_eq(&before, &ctx.state().publish) {
            let storage = Arc::clone(&self.storage);
            ctx.after_commit(move |committed| {
                if let Err(e) = persist_slice(storage.as_ref(), committed, SliceName::Publish) {
                    error::report("PublishSnapshotMiddleware: snapshot not saved", &e);
                }
            });
        }
        Ok(())
    }
}
