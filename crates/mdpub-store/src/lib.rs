//! mdpub state core
//!
//! A single state tree split into slices, a synchronous dispatch loop with an
//! ordered middleware chain, change subscribers, and debounced persistence of
//! selected slices with rehydration at startup.

pub mod actions;
pub mod cli;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod listing;
pub mod logger;
pub mod middleware;
pub mod persistence;
pub mod reducer;
pub mod reducers;
pub mod state;
pub mod store;
pub mod subscription;
pub mod thunks;

pub use actions::{Action, WireAction};
pub use context::AppContext;
pub use error::{PersistError, RehydrateError, StoreError};
pub use state::{AppState, SliceName};
pub use store::{DispatchOutcome, Store, WeakStore};
pub use subscription::{Listener, Subscription};
