//! Publish State

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of past publish attempts kept, newest first
pub const PUBLISH_HISTORY_LIMIT: usize = 10;

/// Where rendered pages are published to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishMode {
    #[default]
    Local,
    Spaces,
}

/// Outcome of one publish attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRecord {
    pub timestamp: DateTime<Utc>,
    pub mode: PublishMode,
    pub success: bool,
    pub error: Option<String>,
    pub file_count: usize,
    /// File that triggered the publish, when known
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishState {
    pub mode: PublishMode,
    pub base_url: Option<String>,
    #[serde(skip)]
    pub in_progress: bool,
    #[serde(skip)]
    pub current_file: Option<String>,
    pub last_result: Option<PublishRecord>,
    pub history: Vec<PublishRecord>,
}

impl PublishState {
    /// Record a finished attempt at the front of the history
    pub fn record(&mut self, record: PublishRecord) {
        self.history.insert(0, record.clone());
        self.history.truncate(PUBLISH_HISTORY_LIMIT);
        self.last_result = Some(record);
    }
}
