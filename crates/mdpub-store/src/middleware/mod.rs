use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::error::StoreError;
use crate::reducer::RootReducer;
use crate::state::AppState;

pub mod communication_logger_middleware;
pub mod devtools_middleware;
pub mod persistence_middleware;
pub mod publish_snapshot_middleware;

pub use communication_logger_middleware::CommunicationLoggerMiddleware;
pub use devtools_middleware::{DevToolsMiddleware, DevToolsStats, SlowAction};
pub use persistence_middleware::PersistenceMiddleware;
pub use publish_snapshot_middleware::PublishSnapshotMiddleware;

/// Middleware trait - wraps the reducer phase of a dispatch
///
/// The first middleware added to the store is the outermost one. Code before
/// `next.run` sees the state before the action, code after it sees the result
/// of every inner middleware and the reducer.
///
/// - `action`: The action being dispatched
/// - `ctx`: Working state of this dispatch and the follow-up dispatcher
/// - `next`: Continues the chain; skipping it swallows the action
///
/// Returning an error aborts the dispatch: nothing is committed. Side effects
/// that must only happen for committed state go through
/// [`MiddlewareContext::after_commit`].
pub trait Middleware: Send {
    /// Name used in logs and errors
    fn name(&self) -> &'static str;

    fn handle(
        &mut self,
        action: &Action,
        ctx: &mut MiddlewareContext,
        next: &mut Next<'_>,
    ) -> Result<(), StoreError>;
}

/// Work deferred until the cycle's tree is committed
pub type CommitEffect = Box<dyn FnOnce(&AppState) + Send>;

/// Mutable view of one dispatch cycle
pub struct MiddlewareContext {
    state: AppState,
    dispatcher: Dispatcher,
    effects: Vec<CommitEffect>,
}

impl MiddlewareContext {
    pub(crate) fn new(state: AppState) -> Self {
        Self {
            state,
            dispatcher: Dispatcher::new(),
            effects: Vec::new(),
        }
    }

    /// Working state: the committed tree before the reducer ran, the reduced
    /// tree once `next.run` returned
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatcher(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Queue a follow-up action, dispatched after this cycle commits
    pub fn dispatch(&mut self, action: Action) {
        self.dispatcher.dispatch(action);
    }

    /// Run `effect` with the committed tree once this cycle commits
    ///
    /// Dropped when the dispatch fails or leaves every slice unchanged.
    pub fn after_commit(&mut self, effect: impl FnOnce(&AppState) + Send + 'static) {
        self.effects.push(Box::new(effect));
    }

    pub(crate) fn into_parts(self) -> (AppState, Dispatcher, Vec<CommitEffect>) {
        (self.state, self.dispatcher, self.effects)
    }
}

/// Remainder of the chain, ending in the root reducer
pub struct Next<'a> {
    chain: &'a mut [Box<dyn Middleware>],
    reducer: &'a RootReducer,
}

impl<'a> Next<'a> {
    pub(crate) fn new(chain: &'a mut [Box<dyn Middleware>], reducer: &'a RootReducer) -> Self {
        Self { chain, reducer }
    }

    /// Run the inner middleware and the reducer against `ctx`
    pub fn run(&mut self, action: &Action, ctx: &mut MiddlewareContext) -> Result<(), StoreError> {
        match self.chain.split_first_mut() {
            Some((middleware, rest)) => {
                let mut next = Next {
                    chain: rest,
                    reducer: self.reducer,
                };
                middleware.handle(action, ctx, &mut next)
            }
            None => {
                ctx.state = (self.reducer)(&ctx.state, action);
                Ok(())
            }
        }
    }
}
