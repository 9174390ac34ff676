//! Editor actions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Actions for the editor pane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
#[serde(
    tag = "verb",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[strum(serialize_all = "camelCase")]
pub enum EditorAction {
    /// Replace the buffer content (marks the buffer dirty)
    SetContent { content: String },
    /// Load a file into the buffer
    OpenFile { path: String, content: String },
    /// Move the cursor (clamped to the buffer length)
    SetCursor { position: usize },
    /// Buffer was written out
    MarkSaved {
        #[serde(default = "Utc::now")]
        timestamp: DateTime<Utc>,
    },
}
