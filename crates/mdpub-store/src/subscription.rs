//! Subscriber registry
//!
//! Listeners are called after every commit that changed at least one slice,
//! with the new and the previous tree. Membership is keyed by the listener's
//! `Arc` identity, so registering the same listener twice keeps one entry.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};

use crate::error;
use crate::state::AppState;

/// Change listener, called with `(new, prev)`
pub type Listener = Arc<dyn Fn(&AppState, &AppState) -> anyhow::Result<()> + Send + Sync>;

#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    inner: Mutex<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

fn identity(listener: &Listener) -> *const () {
    Arc::as_ptr(listener) as *const ()
}

impl SubscriberRegistry {
    /// Register `listener`, returning its id; an already registered listener keeps its id
    pub(crate) fn insert(&self, listener: Listener) -> u64 {
        let mut inner = self.inner.lock();
        if let Some((id, _)) = inner
            .listeners
            .iter()
            .find(|(_, existing)| identity(existing) == identity(&listener))
        {
            return *id;
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, listener));
        id
    }

    fn remove(&self, id: u64) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(existing, _)| *existing != id);
        inner.listeners.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Call every listener in registration order
    ///
    /// The registry lock is released before any listener runs, so listeners
    /// may subscribe, unsubscribe or dispatch. A failing listener is logged
    /// and does not stop the others.
    pub(crate) fn notify(&self, next: &AppState, prev: &AppState) {
        let listeners: Vec<Listener> = self
            .inner
            .lock()
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            if let Err(e) = listener(next, prev) {
                error::report("Subscriber failed", &*e);
            }
        }
    }
}

/// Handle returned by `Store::subscribe`
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Clone)]
pub struct Subscription {
    id: u64,
    registry: Weak<SubscriberRegistry>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: &Arc<SubscriberRegistry>) -> Self {
        Self {
            id,
            registry: Arc::downgrade(registry),
        }
    }

    /// Remove the listener. Returns `false` when it was already removed.
    pub fn unsubscribe(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.remove(self.id),
            None => false,
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
