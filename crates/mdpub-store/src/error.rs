//! Error types
//!
//! Middleware failures abort a dispatch. Persistence and rehydration failures
//! are recoverable: they are reported through [`report`] and the app keeps
//! running on the in-memory state.

use std::error::Error;

use mdpub_config::{RecordError, StorageError};
use thiserror::Error;

use crate::actions::Action;
use crate::state::SliceName;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("middleware '{middleware}' failed on {action_type}: {message}")]
    Middleware {
        middleware: &'static str,
        action_type: String,
        message: String,
    },
}

impl StoreError {
    pub fn middleware(name: &'static str, action: &Action, message: impl ToString) -> Self {
        StoreError::Middleware {
            middleware: name,
            action_type: action.action_type(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to serialize slice '{slice}': {source}")]
    Serialize {
        slice: SliceName,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode record for '{slice}': {source}")]
    Encode {
        slice: SliceName,
        #[source]
        source: RecordError,
    },

    #[error("failed to write slice '{slice}': {source}")]
    Storage {
        slice: SliceName,
        #[source]
        source: StorageError,
    },

    #[error("persistence worker has stopped")]
    WorkerStopped,
}

#[derive(Debug, Error)]
pub enum RehydrateError {
    #[error("failed to read '{slice}': {source}")]
    Storage {
        slice: SliceName,
        #[source]
        source: StorageError,
    },

    #[error("record for '{slice}' is unreadable: {source}")]
    Record {
        slice: SliceName,
        #[source]
        source: RecordError,
    },

    #[error("record for '{slice}' is not an object")]
    NotAnObject { slice: SliceName },

    #[error("field '{field}' of '{slice}' does not match its schema: {source}")]
    InvalidField {
        slice: SliceName,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("restored '{slice}' does not match its schema: {source}")]
    Schema {
        slice: SliceName,
        #[source]
        source: serde_json::Error,
    },
}

/// Log level an error deserves, decided by the first known kind in its chain
pub fn level_of(error: &(dyn Error + 'static)) -> log::Level {
    let mut current = Some(error);
    while let Some(e) = current {
        if let Some(e) = e.downcast_ref::<StorageError>() {
            return match e {
                StorageError::QuotaExceeded { .. } => log::Level::Warn,
                StorageError::InvalidKey(_) | StorageError::Io { .. } => log::Level::Error,
            };
        }
        if let Some(e) = e.downcast_ref::<RehydrateError>() {
            return match e {
                RehydrateError::Storage { .. } => log::Level::Error,
                _ => log::Level::Warn,
            };
        }
        if let Some(e) = e.downcast_ref::<PersistError>() {
            match e {
                PersistError::WorkerStopped => return log::Level::Warn,
                PersistError::Serialize { .. } | PersistError::Encode { .. } => {
                    return log::Level::Error
                }
                // Classified by its storage source
                PersistError::Storage { .. } => {}
            }
        }
        if e.downcast_ref::<StoreError>().is_some() {
            return log::Level::Error;
        }
        current = e.source();
    }
    log::Level::Error
}

/// Log a recoverable error with the level its kind calls for
pub fn report(context: &str, error: &(dyn Error + 'static)) {
    log::log!(level_of(error), "{}: {}", context, error);
}
