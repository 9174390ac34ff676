//! Persisted slice record format
//!
//! Records are written as `{"version": 1, "state": {...}}`. Records written
//! before versioning was introduced are the bare slice object; those still
//! decode and are reported as [`RecordFormat::Legacy`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("record version {0} is newer than supported version {RECORD_VERSION}")]
    UnsupportedVersion(u32),
}

/// How a record was stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Versioned,
    Legacy,
}

/// Versioned envelope around a slice snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub version: u32,
    pub state: Value,
}

impl PersistedRecord {
    pub fn new(state: Value) -> Self {
        Self {
            version: RECORD_VERSION,
            state,
        }
    }

    pub fn encode(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored record, accepting both the envelope and the legacy bare form
    pub fn decode(raw: &str) -> Result<(Self, RecordFormat), RecordError> {
        let value: Value = serde_json::from_str(raw)?;

        let is_envelope = value
            .as_object()
            .map(|obj| obj.len() == 2 && obj.contains_key("version") && obj.contains_key("state"))
            .unwrap_or(false);

        if !is_envelope {
            return Ok((Self::new(value), RecordFormat::Legacy));
        }

        let record: PersistedRecord = serde_json::from_value(value)?;
        if record.version > RECORD_VERSION {
            return Err(RecordError::UnsupportedVersion(record.version));
        }
        Ok((record, RecordFormat::Versioned))
    }
}
