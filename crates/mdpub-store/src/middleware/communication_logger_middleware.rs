//! Communication Logger Middleware
//!
//! Records every dispatched action in the communications slice as a
//! follow-up `communications/logAction`. That action itself is not recorded.

use chrono::Utc;

use crate::actions::{Action, CommunicationsAction};
use crate::error::StoreError;
use crate::middleware::{Middleware, MiddlewareContext, Next};
use crate::state::CommunicationEntry;

#[derive(Debug, Default)]
pub struct CommunicationLoggerMiddleware;

impl CommunicationLoggerMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for CommunicationLoggerMiddleware {
    fn name(&self) -> &'static str {
        "communication-logger"
    }

    fn handle(
        &mut self,
        action: &Action,
        ctx: &mut MiddlewareContext,
        next: &mut Next<'_>,
    ) -> Result<(), StoreError> {
        if matches!(
            action,
            Action::Communications(CommunicationsAction::LogAction(_))
        ) {
            return next.run(action, ctx);
        }

        log::debug!("Action: {}", action.action_type());
        ctx.dispatch(Action::Communications(CommunicationsAction::LogAction(
            CommunicationEntry {
                action_type: action.action_type(),
                payload: action.payload(),
                timestamp: Utc::now(),
            },
        )));
        next.run(action, ctx)
    }
}
