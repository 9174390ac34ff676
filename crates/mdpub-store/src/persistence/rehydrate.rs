//! Rehydration
//!
//! A stored record is merged onto the slice defaults one top-level field at
//! a time. Each merged field is checked by deserializing the candidate slice;
//! a field that breaks the schema is dropped and the default kept. A record
//! that cannot be read at all leaves the slice at its defaults. Nothing here
//! aborts startup.

use mdpub_config::{PersistedRecord, RecordFormat, Storage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::deep_merge;
use crate::error::{self, RehydrateError};
use crate::state::{AppState, SliceName};

/// Restore `slices` from storage on top of `defaults`
pub fn rehydrate(storage: &dyn Storage, slices: &[SliceName], defaults: AppState) -> AppState {
    let mut state = defaults;
    for &slice in slices {
        match restore_slice(storage, slice, &mut state) {
            Ok(true) => log::info!("Rehydrated slice '{}'", slice),
            Ok(false) => log::debug!("No persisted record for '{}'", slice),
            Err(e) => error::report(&format!("Keeping defaults for '{}'", slice), &e),
        }
    }
    state
}

fn restore_slice(
    storage: &dyn Storage,
    slice: SliceName,
    state: &mut AppState,
) -> Result<bool, RehydrateError> {
    match slice {
        SliceName::Editor => restore(storage, slice, &mut state.editor),
        SliceName::Panels => restore(storage, slice, &mut state.panels),
        SliceName::Log => restore(storage, slice, &mut state.log),
        SliceName::Publish => restore(storage, slice, &mut state.publish),
        SliceName::Path => restore(storage, slice, &mut state.path),
        SliceName::Plugins => restore(storage, slice, &mut state.plugins),
        SliceName::Communications => restore(storage, slice, &mut state.communications),
        SliceName::Ui => restore(storage, slice, &mut state.ui),
    }
}

fn restore<S>(storage: &dyn Storage, slice: SliceName, current: &mut Arc<S>) -> Result<bool, RehydrateError>
where
    S: Serialize + DeserializeOwned,
{
    match load_slice(storage, slice, &**current)? {
        Some(restored) => {
            *current = Arc::new(restored);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Read one slice record and merge it onto `defaults`
///
/// Returns `Ok(None)` when nothing is stored under the slice key.
pub fn load_slice<S>(storage: &dyn Storage, slice: SliceName, defaults: &S) -> Result<Option<S>, RehydrateError>
where
    S: Serialize + DeserializeOwned,
{
    let raw = storage
        .get_item(slice.as_ref())
        .map_err(|source| RehydrateError::Storage { slice, source })?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    let (record, format) =
        PersistedRecord::decode(&raw).map_err(|source| RehydrateError::Record { slice, source })?;
    if format == RecordFormat::Legacy {
        log::debug!("Record for '{}' has no version envelope", slice);
    }

    let defaults =
        serde_json::to_value(defaults).map_err(|source| RehydrateError::Schema { slice, source })?;
    merge_checked(slice, defaults, &record.state).map(Some)
}

fn merge_checked<S: DeserializeOwned>(
    slice: SliceName,
    defaults: Value,
    stored: &Value,
) -> Result<S, RehydrateError> {
    let Value::Object(stored) = stored else {
        return Err(RehydrateError::NotAnObject { slice });
    };

    let mut accepted = defaults;
    for (field, value) in stored {
        let mut candidate = accepted.clone();
        let Some(fields) = candidate.as_object_mut() else {
            return Err(RehydrateError::NotAnObject { slice });
        };
        let merged = match fields.get(field) {
            Some(current) => deep_merge(current, value),
            None => value.clone(),
        };
        fields.insert(field.clone(), merged);

        match serde_json::from_value::<S>(candidate.clone()) {
            Ok(_) => accepted = candidate,
            Err(source) => {
                let e = RehydrateError::InvalidField {
                    slice,
                    field: field.clone(),
                    source,
                };
                error::report("Dropping persisted field", &e);
            }
        }
    }

    serde_json::from_value(accepted).map_err(|source| RehydrateError::Schema { slice, source })
}
