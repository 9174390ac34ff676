//! DevTools Middleware
//!
//! Times the inner chain and reducer for every action, logs which slices
//! changed and keeps a short list of actions slower than the threshold.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::actions::Action;
use crate::error::StoreError;
use crate::middleware::{Middleware, MiddlewareContext, Next};

const SLOW_ACTIONS_KEPT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct SlowAction {
    pub action_type: String,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct DevToolsStats {
    pub actions: u64,
    pub total_time: Duration,
    /// Most recent slow actions, oldest first
    pub slow_actions: VecDeque<SlowAction>,
}

pub struct DevToolsMiddleware {
    threshold: Duration,
    stats: Arc<Mutex<DevToolsStats>>,
}

impl DevToolsMiddleware {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            stats: Arc::new(Mutex::new(DevToolsStats::default())),
        }
    }

    /// Shared view of the collected stats
    pub fn stats(&self) -> Arc<Mutex<DevToolsStats>> {
        Arc::clone(&self.stats)
    }
}

impl Middleware for DevToolsMiddleware {
    fn name(&self) -> &'static str {
        "devtools"
    }

    fn handle(
        &mut self,
        action: &Action,
        ctx: &mut MiddlewareContext,
        next: &mut Next<'_>,
    ) -> Result<(), StoreError> {
        let before = ctx.state().clone();
        let started = Instant::now();
        let result = next.run(action, ctx);
        let elapsed = started.elapsed();

        let action_type = action.action_type();
        if let Err(e) = &result {
            log::debug!("DevToolsMiddleware: {} failed after {:?}: {}", action_type, elapsed, e);
            return result;
        }

        let changed = ctx.state().changed_slices(&before);
        log::debug!(
            "DevToolsMiddleware: {} took {:?}, changed {:?}",
            action_type,
            elapsed,
            changed
        );

        let mut stats = self.stats.lock();
        stats.actions += 1;
        stats.total_time += elapsed;
        if elapsed > self.threshold {
            log::warn!(
                "DevToolsMiddleware: slow action {} took {:?} (threshold {:?})",
                action_type,
                elapsed,
                self.threshold
            );
            stats.slow_actions.push_back(SlowAction {
                action_type,
                elapsed,
            });
            while stats.slow_actions.len() > SLOW_ACTIONS_KEPT {
                stats.slow_actions.pop_front();
            }
        }
        Ok(())
    }
}
