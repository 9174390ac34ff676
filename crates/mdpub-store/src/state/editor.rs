//! Editor State

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Markdown editor pane state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    /// Current buffer content
    pub content: String,
    /// File the buffer was opened from, if any
    pub file_path: Option<String>,
    /// Cursor position in characters (never past the end of `content`)
    pub cursor: usize,
    /// Buffer differs from the last saved version
    pub dirty: bool,
    pub last_saved: Option<DateTime<Utc>>,
}

impl EditorState {
    /// Length of the buffer in characters
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
