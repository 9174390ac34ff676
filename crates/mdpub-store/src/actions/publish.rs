//! Publish actions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::state::PublishMode;

/// Actions for the publish slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
#[serde(
    tag = "verb",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[strum(serialize_all = "camelCase")]
pub enum PublishAction {
    SetMode {
        mode: PublishMode,
    },
    SetBaseUrl {
        url: Option<String>,
    },
    StartPublishing {
        #[serde(default)]
        file: Option<String>,
    },
    FinishPublishing {
        #[serde(default = "Utc::now")]
        timestamp: DateTime<Utc>,
        success: bool,
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        file_count: usize,
    },
    ClearHistory,
}
