//! Communications State
//!
//! Diagnostic trace of every dispatched action, filled by the
//! communication logger middleware.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;

pub const COMMUNICATIONS_CAPACITY: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationEntry {
    pub action_type: String,
    pub payload: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunicationsState {
    pub entries: VecDeque<CommunicationEntry>,
}

impl CommunicationsState {
    pub fn push(&mut self, entry: CommunicationEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > COMMUNICATIONS_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Most recent entry for the given action type
    pub fn last_of(&self, action_type: &str) -> Option<&CommunicationEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.action_type == action_type)
    }
}
