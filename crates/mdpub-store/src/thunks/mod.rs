//! Thunks
//!
//! A thunk is any `FnOnce(&Store) -> R` handed to `Store::dispatch_thunk`.
//! Async thunks return a boxed future that owns a clone of the store and
//! dispatches between awaits.

use std::future::Future;
use std::pin::Pin;

pub mod path;

pub use path::fetch_listing_by_path;

/// Boxed, sendable future returned by async thunks
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
