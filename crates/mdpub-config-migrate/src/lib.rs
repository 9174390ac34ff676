//! Migration utilities for mdpub persisted slice records
//!
//! Handles upgrading stored records from old formats to the current one.
//!
//! # Migrations
//!
//! - bare slice object → `{"version": 1, "state": ...}` envelope

use anyhow::{Context, Result};
use mdpub_config::{PersistedRecord, RecordFormat, Storage};

/// Outcome of migrating a single slice record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No record stored for this slice
    Missing,
    /// Record already uses the current format
    UpToDate,
    /// Record was rewritten in the current format
    Upgraded,
}

/// Run all migrations for the given slice keys
///
/// This should be called during application bootstrap, before rehydration.
/// Migrations are idempotent - they only rewrite records that need it.
/// A failing slice is logged and does not stop the others.
pub fn run_migrations(storage: &dyn Storage, slices: &[&str]) {
    for slice in slices {
        match migrate_record(storage, slice) {
            Ok(MigrationOutcome::Upgraded) => {
                log::info!("Migrated persisted record for '{}'", slice)
            }
            Ok(_) => log::debug!("No migration needed for '{}'", slice),
            Err(e) => log::warn!("Record migration failed for '{}': {:#}", slice, e),
        }
    }
}

/// Upgrade a legacy bare record to the versioned envelope
pub fn migrate_record(storage: &dyn Storage, key: &str) -> Result<MigrationOutcome> {
    let Some(raw) = storage
        .get_item(key)
        .with_context(|| format!("Failed to read record '{}'", key))?
    else {
        return Ok(MigrationOutcome::Missing);
    };

    let (record, format) = PersistedRecord::decode(&raw)
        .with_context(|| format!("Failed to decode record '{}'", key))?;

    if format == RecordFormat::Versioned {
        return Ok(MigrationOutcome::UpToDate);
    }

    let encoded = record
        .encode()
        .with_context(|| format!("Failed to encode record '{}'", key))?;
    storage
        .set_item(key, &encoded)
        .with_context(|| format!("Failed to write migrated record '{}'", key))?;

    Ok(MigrationOutcome::Upgraded)
}
