//! Application context
//!
//! Built once at startup and passed by reference: loads persisted slices,
//! assembles the middleware chain and owns the handles needed at shutdown.

use mdpub_config::{AppConfig, Storage};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::error;
use crate::listing::DirectoryLister;
use crate::middleware::{
    CommunicationLoggerMiddleware, DevToolsMiddleware, DevToolsStats, PersistenceMiddleware,
    PublishSnapshotMiddleware,
};
use crate::persistence::{self, PersistenceHandle};
use crate::state::{AppState, SliceName};
use crate::store::Store;

pub struct AppContext {
    pub config: AppConfig,
    pub storage: Arc<dyn Storage>,
    pub store: Store,
    pub lister: Arc<dyn DirectoryLister>,
    /// Slices written by the debounced persistence middleware
    pub persisted_slices: Vec<SliceName>,
    persistence: PersistenceHandle,
    devtools: Option<Arc<Mutex<DevToolsStats>>>,
}

impl AppContext {
    /// Migrate and rehydrate stored slices, then build the store
    ///
    /// Middleware order, outermost first: communication logger, persistence,
    /// publish snapshot, devtools.
    pub fn build(
        config: AppConfig,
        storage: Arc<dyn Storage>,
        lister: Arc<dyn DirectoryLister>,
    ) -> Self {
        let persisted_slices = persistence::parse_slices(&config.persistence.slices);

        // The publish slice is always restored; it is written by its own middleware
        let mut restored = persisted_slices.clone();
        if !restored.contains(&SliceName::Publish) {
            restored.push(SliceName::Publish);
        }

        let keys: Vec<&str> = restored.iter().map(|s| s.as_ref()).collect();
        mdpub_config_migrate::run_migrations(storage.as_ref(), &keys);

        let initial = persistence::rehydrate(storage.as_ref(), &restored, AppState::default());
        let store = Store::new(initial);

        store.add_middleware(Box::new(CommunicationLoggerMiddleware::new()));

        let persistence = PersistenceMiddleware::new(
            Arc::clone(&storage),
            persisted_slices.clone(),
            Duration::from_millis(config.persistence.debounce_ms),
        );
        let persistence_handle = persistence.persistence_handle();
        store.add_middleware(Box::new(persistence));

        store.add_middleware(Box::new(PublishSnapshotMiddleware::new(Arc::clone(
            &storage,
        ))));

        let devtools = if config.devtools.enabled {
            let middleware = DevToolsMiddleware::new(Duration::from_millis(
                config.devtools.slow_action_threshold_ms,
            ));
            let stats = middleware.stats();
            store.add_middleware(Box::new(middleware));
            Some(stats)
        } else {
            None
        };

        log::info!(
            "Store ready with middleware {:?}, persisting {:?}",
            store.middleware_names(),
            persisted_slices
        );

        Self {
            config,
            storage,
            store,
            lister,
            persisted_slices,
            persistence: persistence_handle,
            devtools,
        }
    }

    /// Write pending persisted state now
    pub fn flush(&self) -> bool {
        match self.persistence.flush() {
            Ok(()) => true,
            Err(e) => {
                error::report("Flush failed", &e);
                false
            }
        }
    }

    pub fn devtools_stats(&self) -> Option<DevToolsStats> {
        self.devtools.as_ref().map(|stats| stats.lock().clone())
    }

    /// Flush pending writes before exit
    pub fn shutdown(self) {
        log::info!("Shutting down");
        self.flush();
    }
}
