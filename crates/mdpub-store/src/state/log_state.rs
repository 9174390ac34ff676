//! Log State
//!
//! Bounded console log shown by the console panel. The buffer keeps the
//! newest [`LOG_CAPACITY`] entries and evicts the oldest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, VecDeque};

pub const LOG_CAPACITY: usize = 1000;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Entry as submitted by a caller, before the log assigns an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLogEntry {
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub level: LogLevel,
    /// Free-form category, e.g. "publish" or "network"
    #[serde(rename = "type", default = "default_entry_type")]
    pub entry_type: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<Value>,
}

fn default_entry_type() -> String {
    "general".to_string()
}

impl NewLogEntry {
    pub fn new(level: LogLevel, entry_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            entry_type: entry_type.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub message: String,
    pub details: Option<Value>,
}

impl LogEntry {
    /// Lowercased haystacks used for keyword matching
    fn search_fields(&self) -> [String; 3] {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        [
            self.message.to_lowercase(),
            details.to_lowercase(),
            self.entry_type.to_lowercase(),
        ]
    }
}

/// Console filter
///
/// Keywords match case-insensitively against the message, the serialized
/// details and the entry type. Exclusion is checked first and wins. Type and
/// level sets restrict the view when non-empty; include keywords are ORed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogFilter {
    pub types: BTreeSet<String>,
    pub levels: BTreeSet<LogLevel>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl LogFilter {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        let fields = entry.search_fields();
        let contains = |keyword: &String| {
            let needle = keyword.to_lowercase();
            fields.iter().any(|field| field.contains(&needle))
        };

        if self.exclude.iter().any(contains) {
            return false;
        }

        if !self.types.is_empty()
            && !self
                .types
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&entry.entry_type))
        {
            return false;
        }

        if !self.levels.is_empty() && !self.levels.contains(&entry.level) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(contains)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.levels.is_empty()
            && self.include.is_empty()
            && self.exclude.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogState {
    pub entries: VecDeque<LogEntry>,
    /// Every entry type currently present in `entries`
    pub discovered_types: BTreeSet<String>,
    pub next_id: u64,
    pub filter: LogFilter,
}

impl LogState {
    /// Append an entry, evicting the oldest when the buffer is full
    pub fn push(&mut self, entry: NewLogEntry) {
        let id = self.next_id;
        self.next_id += 1;

        self.entries.push_back(LogEntry {
            id,
            timestamp: entry.timestamp,
            level: entry.level,
            entry_type: entry.entry_type,
            message: entry.message,
            details: entry.details,
        });
        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }

        // Bounded by LOG_CAPACITY, so a full rescan stays cheap
        self.discovered_types = self
            .entries
            .iter()
            .map(|e| e.entry_type.clone())
            .collect();
    }

    /// Entries passing the current filter, oldest first
    pub fn visible_entries(&self) -> Vec<&LogEntry> {
        self.filtered(&self.filter)
    }

    pub fn filtered(&self, filter: &LogFilter) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }
}
