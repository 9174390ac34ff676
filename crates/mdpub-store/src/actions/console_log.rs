//! Console log actions

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::state::{LogFilter, LogLevel, NewLogEntry};

/// Actions for the console log slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
#[serde(
    tag = "verb",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[strum(serialize_all = "camelCase")]
pub enum LogAction {
    AddEntry(NewLogEntry),
    Clear,
    SetFilter(LogFilter),
}

impl LogAction {
    /// Convenience constructor for `log/addEntry` stamped with the current time
    pub fn entry(level: LogLevel, entry_type: &str, message: impl Into<String>) -> Self {
        LogAction::AddEntry(NewLogEntry::new(level, entry_type, message))
    }
}
