//! Store - holds application state and manages the Redux loop
//!
//! `Store` is a cheap handle; clones share the same state, middleware chain
//! and subscribers. A dispatch runs the chain against a working copy of the
//! committed tree and commits only when a slice actually changed.

use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use crate::actions::Action;
use crate::error::{self, StoreError};
use crate::middleware::{Middleware, MiddlewareContext, Next};
use crate::reducer::{self, RootReducer};
use crate::state::{AppState, SliceName};
use crate::subscription::{Listener, SubscriberRegistry, Subscription};

/// Result of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Every slice kept its identity, nothing was committed
    Unchanged,
    /// The tree was committed with these slices replaced
    Changed(Vec<SliceName>),
}

impl DispatchOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, DispatchOutcome::Changed(_))
    }

    pub fn changed_slices(&self) -> &[SliceName] {
        match self {
            DispatchOutcome::Unchanged => &[],
            DispatchOutcome::Changed(slices) => slices,
        }
    }
}

struct Pipeline {
    middleware: Vec<Box<dyn Middleware>>,
    reducer: Box<RootReducer>,
}

struct Shared {
    /// Serializes dispatch cycles
    pipeline: Mutex<Pipeline>,
    state: RwLock<AppState>,
    subscribers: Arc<SubscriberRegistry>,
}

#[derive(Clone)]
pub struct Store {
    shared: Arc<Shared>,
}

/// Handle that does not keep the store alive
///
/// Listeners are owned by the store, so a listener holding a `Store` clone
/// keeps it (and its middleware) alive forever. Capture a `WeakStore` instead.
#[derive(Clone)]
pub struct WeakStore {
    shared: Weak<Shared>,
}

impl WeakStore {
    /// `None` once every `Store` handle is gone
    pub fn upgrade(&self) -> Option<Store> {
        self.shared.upgrade().map(|shared| Store { shared })
    }
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        Self::with_reducer(initial_state, reducer::reduce)
    }

    /// Store with a custom root reducer
    pub fn with_reducer<R>(initial_state: AppState, reducer: R) -> Self
    where
        R: Fn(&AppState, &Action) -> AppState + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                pipeline: Mutex::new(Pipeline {
                    middleware: Vec::new(),
                    reducer: Box::new(reducer),
                }),
                state: RwLock::new(initial_state),
                subscribers: Arc::new(SubscriberRegistry::default()),
            }),
        }
    }

    /// Add middleware to the store
    ///
    /// Middleware added first runs outermost. Waits for a running dispatch.
    pub fn add_middleware(&self, middleware: Box<dyn Middleware>) {
        let mut pipeline = self.shared.pipeline.lock();
        log::debug!("Store: adding middleware {}", middleware.name());
        pipeline.middleware.push(middleware);
    }

    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.shared
            .pipeline
            .lock()
            .middleware
            .iter()
            .map(|m| m.name())
            .collect()
    }

    /// Get the current committed state
    pub fn state(&self) -> AppState {
        self.shared.state.read().clone()
    }

    /// Read a projection of the committed state
    ///
    /// The selector runs on a snapshot, so it may dispatch.
    pub fn select<T>(&self, selector: impl FnOnce(&AppState) -> T) -> T {
        selector(&self.state())
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Process an action through middleware chain and reducer
    ///
    /// Subscribers are notified after the commit. Actions queued by middleware
    /// are dispatched afterwards in FIFO order; their failures are logged and
    /// do not change the returned outcome.
    pub fn dispatch(&self, action: Action) -> Result<DispatchOutcome, StoreError> {
        let (outcome, queued) = self.run_cycle(&action)?;

        let mut pending: VecDeque<Action> = queued.into();
        while let Some(follow_up) = pending.pop_front() {
            match self.run_cycle(&follow_up) {
                Ok((_, queued)) => pending.extend(queued),
                Err(e) => error::report(
                    &format!("Follow-up action {} failed", follow_up.action_type()),
                    &e,
                ),
            }
        }

        Ok(outcome)
    }

    /// Invoke a thunk with this store and hand back whatever it returns
    ///
    /// Async thunks return a future; the caller awaits it.
    pub fn dispatch_thunk<R>(&self, thunk: impl FnOnce(&Store) -> R) -> R {
        thunk(self)
    }

    /// Register a listener called as `listener(new, prev)` after each change
    ///
    /// A listener that dispatches should capture [`Store::downgrade`] rather
    /// than a `Store` clone.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AppState, &AppState) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe_shared(Arc::new(listener))
    }

    /// Register a shared listener; registering the same `Arc` again is a no-op
    pub fn subscribe_shared(&self, listener: Listener) -> Subscription {
        let id = self.shared.subscribers.insert(listener);
        Subscription::new(id, &self.shared.subscribers)
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.len()
    }

    fn run_cycle(&self, action: &Action) -> Result<(DispatchOutcome, Vec<Action>), StoreError> {
        let (next, prev, mut dispatcher) = {
            let mut pipeline = self.shared.pipeline.lock();
            let Pipeline {
                middleware,
                reducer,
            } = &mut *pipeline;

            let prev = self.shared.state.read().clone();
            let mut ctx = MiddlewareContext::new(prev.clone());
            Next::new(middleware, &**reducer).run(action, &mut ctx)?;

            let (next, mut dispatcher, effects) = ctx.into_parts();
            if next.changed_slices(&prev).is_empty() {
                return Ok((DispatchOutcome::Unchanged, dispatcher.drain()));
            }
            *self.shared.state.write() = next.clone();
            // Still under the pipeline lock so effects see commits in order
            for effect in effects {
                effect(&next);
            }
            (next, prev, dispatcher)
        };

        let changed = next.changed_slices(&prev);
        log::trace!("Store: {} changed {:?}", action.action_type(), changed);
        self.shared.subscribers.notify(&next, &prev);

        Ok((DispatchOutcome::Changed(changed), dispatcher.drain()))
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.shared.state.read())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{EditorAction, UiAction};
    use mdpub_config::Storage;
    use crate::middleware::tests::Recorder;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn toggle_sidebar() -> Action {
        Action::Ui(UiAction::ToggleSidebar)
    }

    fn counting_listener(store: &Store) -> (Arc<AtomicUsize>, Subscription) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = store.subscribe(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        (calls, subscription)
    }

    /// Fails every action of the given slice before calling `next`
    struct Reject(SliceName);

    impl Middleware for Reject {
        fn name(&self) -> &'static str {
            "reject"
        }

        fn handle(
            &mut self,
            action: &Action,
            ctx: &mut MiddlewareContext,
            next: &mut Next<'_>,
        ) -> Result<(), StoreError> {
            ctx.dispatch(Action::Editor(EditorAction::SetCursor { position: 0 }));
            if action.slice() == self.0 {
                return Err(StoreError::middleware(self.name(), action, "rejected"));
            }
            next.run(action, ctx)
        }
    }

    /// Queues a sidebar toggle after every theme change
    struct FollowUp;

    impl Middleware for FollowUp {
        fn name(&self) -> &'static str {
            "follow-up"
        }

        fn handle(
            &mut self,
            action: &Action,
            ctx: &mut MiddlewareContext,
            next: &mut Next<'_>,
        ) -> Result<(), StoreError> {
            next.run(action, ctx)?;
            if matches!(action, Action::Ui(UiAction::SetTheme { .. })) {
                ctx.dispatch(toggle_sidebar());
            }
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_commits_and_notifies() {
        let store = Store::new(AppState::default());
        let (calls, _subscription) = counting_listener(&store);

        let outcome = store.dispatch(toggle_sidebar()).unwrap();
        assert_eq!(outcome, DispatchOutcome::Changed(vec![SliceName::Ui]));
        assert!(!store.state().ui.sidebar_visible);
        assert!(!store.select(|s| s.ui.sidebar_visible));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unchanged_dispatch_does_not_notify() {
        let store = Store::new(AppState::default());
        let (calls, _subscription) = counting_listener(&store);
        let before = store.state();

        let width = before.ui.sidebar_width;
        let outcome = store
            .dispatch(Action::Ui(UiAction::SetSidebarWidth { width }))
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Unchanged);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(Arc::ptr_eq(&before.ui, &store.state().ui));
    }

    #[test]
    fn test_listener_receives_new_and_previous_state() {
        let store = Store::new(AppState::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = store.subscribe(move |next, prev| {
            sink.lock()
                .push((prev.ui.sidebar_visible, next.ui.sidebar_visible));
            Ok(())
        });

        store.dispatch(toggle_sidebar()).unwrap();
        assert_eq!(*seen.lock(), vec![(true, false)]);
    }

    #[test]
    fn test_middleware_order_through_store() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&events);
        let store = Store::with_reducer(AppState::default(), move |state, action| {
            log.lock().push("reducer".to_string());
            reducer::reduce(state, action)
        });
        store.add_middleware(Box::new(Recorder {
            name: "A",
            events: Arc::clone(&events),
        }));
        store.add_middleware(Box::new(Recorder {
            name: "B",
            events: Arc::clone(&events),
        }));
        assert_eq!(store.middleware_names(), vec!["A", "B"]);

        store.dispatch(toggle_sidebar()).unwrap();
        assert_eq!(
            *events.lock(),
            vec!["A.before", "B.before", "reducer", "B.after", "A.after"]
        );
    }

    #[test]
    fn test_middleware_error_aborts_commit_and_notification() {
        let store = Store::new(AppState::default());
        store.add_middleware(Box::new(Reject(SliceName::Ui)));
        let (calls, _subscription) = counting_listener(&store);
        let before = store.state();

        let result = store.dispatch(toggle_sidebar());
        assert!(matches!(
            result,
            Err(StoreError::Middleware {
                middleware: "reject",
                ..
            })
        ));
        assert!(store.state().changed_slices(&before).is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_follow_up_actions_run_after_commit() {
        let store = Store::new(AppState::default());
        store.add_middleware(Box::new(FollowUp));
        let (calls, _subscription) = counting_listener(&store);

        let outcome = store
            .dispatch(Action::Ui(UiAction::SetTheme {
                theme: crate::state::Theme::Dark,
            }))
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Changed(vec![SliceName::Ui]));
        let state = store.state();
        assert_eq!(state.ui.theme, crate::state::Theme::Dark);
        assert!(!state.ui.sidebar_visible);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failing_listener_does_not_stop_others() {
        let store = Store::new(AppState::default());
        let _failing = store.subscribe(|_, _| anyhow::bail!("listener broke"));
        let (calls, _subscription) = counting_listener(&store);

        store.dispatch(toggle_sidebar()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_same_listener_subscribed_twice_is_called_once() {
        let store = Store::new(AppState::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let listener: Listener = Arc::new(move |_: &AppState, _: &AppState| -> anyhow::Result<()> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let first = store.subscribe_shared(Arc::clone(&listener));
        let second = store.subscribe_shared(listener);
        assert_eq!(store.subscriber_count(), 1);

        store.dispatch(toggle_sidebar()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(second.unsubscribe());
        assert!(!first.unsubscribe());
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let store = Store::new(AppState::default());
        let (calls, subscription) = counting_listener(&store);

        assert!(subscription.unsubscribe());
        assert!(!subscription.unsubscribe());

        store.dispatch(toggle_sidebar()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dropping_subscription_keeps_listener() {
        let store = Store::new(AppState::default());
        let (calls, subscription) = counting_listener(&store);
        drop(subscription);

        store.dispatch(toggle_sidebar()).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_dispatch() {
        let store = Store::new(AppState::default());
        let inner = store.downgrade();
        let _subscription = store.subscribe(move |next, _| {
            if next.ui.theme == crate::state::Theme::Dark && next.ui.scroll_sync {
                if let Some(store) = inner.upgrade() {
                    store.dispatch(Action::Ui(UiAction::ToggleScrollSync))?;
                }
            }
            Ok(())
        });

        store
            .dispatch(Action::Ui(UiAction::SetTheme {
                theme: crate::state::Theme::Dark,
            }))
            .unwrap();
        assert!(!store.state().ui.scroll_sync);
    }

    #[test]
    fn test_dispatch_thunk_returns_thunk_result() {
        let store = Store::new(AppState::default());
        let width = store.dispatch_thunk(|store| {
            store
                .dispatch(Action::Ui(UiAction::SetSidebarWidth { width: 400 }))
                .map(|_| store.state().ui.sidebar_width)
        });
        assert_eq!(width.unwrap(), 400);
    }

    #[test]
    fn test_concurrent_dispatches_are_serialized() {
        let store = Store::new(AppState::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store
                            .dispatch(Action::Log(crate::actions::LogAction::entry(
                                crate::state::LogLevel::Info,
                                "test",
                                "tick",
                            )))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.state().log.entries.len(), 100);
    }

    #[test]
    fn test_weak_listener_does_not_keep_store_alive() {
        let store = Store::new(AppState::default());
        let weak = store.downgrade();
        let inner = store.downgrade();
        let _subscription = store.subscribe(move |_, _| {
            if let Some(store) = inner.upgrade() {
                let _ = store.state();
            }
            Ok(())
        });
        store.dispatch(toggle_sidebar()).unwrap();

        assert!(weak.upgrade().is_some());
        drop(store);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_selector_may_dispatch() {
        let store = Store::new(AppState::default());
        let width = store.select(|state| {
            store
                .dispatch(Action::Ui(UiAction::SetSidebarWidth { width: 300 }))
                .unwrap();
            state.ui.sidebar_width
        });

        assert_ne!(width, 300);
        assert_eq!(store.state().ui.sidebar_width, 300);
    }

    /// Lets the inner chain run, then fails the cycle
    struct FailAfterNext;

    impl Middleware for FailAfterNext {
        fn name(&self) -> &'static str {
            "fail-after-next"
        }

        fn handle(
            &mut self,
            action: &Action,
            ctx: &mut MiddlewareContext,
            next: &mut Next<'_>,
        ) -> Result<(), StoreError> {
            next.run(action, ctx)?;
            Err(StoreError::middleware(self.name(), action, "failed after next"))
        }
    }

    #[test]
    fn test_aborted_dispatch_leaves_storage_untouched() {
        use crate::actions::PublishAction;
        use crate::middleware::{PersistenceMiddleware, PublishSnapshotMiddleware};
        use crate::state::{PublishMode, Theme};
        use mdpub_config::MemoryStorage;
        use std::time::Duration;

        let storage = Arc::new(MemoryStorage::new());
        let persistence = PersistenceMiddleware::new(
            storage.clone(),
            vec![SliceName::Ui],
            Duration::from_secs(60),
        );
        let handle = persistence.persistence_handle();

        let store = Store::new(AppState::default());
        store.add_middleware(Box::new(FailAfterNext));
        store.add_middleware(Box::new(persistence));
        store.add_middleware(Box::new(PublishSnapshotMiddleware::new(storage.clone())));

        assert!(store
            .dispatch(Action::Ui(UiAction::SetTheme { theme: Theme::Dark }))
            .is_err());
        assert!(store
            .dispatch(Action::Publish(PublishAction::SetMode {
                mode: PublishMode::Spaces,
            }))
            .is_err());
        handle.flush().unwrap();

        let state = store.state();
        assert_eq!(state.ui.theme, Theme::System);
        assert_eq!(state.publish.mode, PublishMode::Local);
        assert_eq!(storage.total_writes(), 0);
        assert!(storage.get_item("ui").unwrap().is_none());
        assert!(storage.get_item("publish").unwrap().is_none());
    }

    #[test]
    fn test_commit_effects_see_committed_tree() {
        struct Effect(Arc<Mutex<Vec<bool>>>);

        impl Middleware for Effect {
            fn name(&self) -> &'static str {
                "effect"
            }

            fn handle(
                &mut self,
                action: &Action,
                ctx: &mut MiddlewareContext,
                next: &mut Next<'_>,
            ) -> Result<(), StoreError> {
                next.run(action, ctx)?;
                let seen = Arc::clone(&self.0);
                ctx.after_commit(move |committed| seen.lock().push(committed.ui.sidebar_visible));
                Ok(())
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let store = Store::new(AppState::default());
        store.add_middleware(Box::new(Effect(Arc::clone(&seen))));

        store.dispatch(toggle_sidebar()).unwrap();
        // Unchanged cycles drop their effects
        let width = store.state().ui.sidebar_width;
        store
            .dispatch(Action::Ui(UiAction::SetSidebarWidth { width }))
            .unwrap();

        assert_eq!(*seen.lock(), vec![false]);
    }
}
