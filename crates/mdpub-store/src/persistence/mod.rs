//! Slice persistence
//!
//! Allow-listed slices are written through to durable storage by a
//! debounced background worker and restored at startup by merging the
//! stored record onto the slice defaults.

mod merge;
mod rehydrate;
mod worker;

pub use merge::deep_merge;
pub use rehydrate::{load_slice, rehydrate};
pub use worker::{persist_slice, write_slices, PersistWorker, PersistenceHandle};

use crate::state::SliceName;

/// Parse configured slice names, skipping unknown ones
pub fn parse_slices<S: AsRef<str>>(names: &[S]) -> Vec<SliceName> {
    let mut slices = Vec::with_capacity(names.len());
    for name in names {
        match name.as_ref().parse::<SliceName>() {
            Ok(slice) if !slices.contains(&slice) => slices.push(slice),
            Ok(_) => {}
            Err(_) => log::warn!("Ignoring unknown persisted slice '{}'", name.as_ref()),
        }
    }
    slices
}
