//! Plugin actions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::AsRefStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
#[serde(
    tag = "verb",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[strum(serialize_all = "camelCase")]
pub enum PluginsAction {
    SetEnabled { id: String, enabled: bool },
    Toggle { id: String },
    /// Shallow-merge `settings` into the plugin's settings object
    UpdateSettings { id: String, settings: Value },
    Reset,
}
