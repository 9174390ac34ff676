//! Plugins State
//!
//! Markdown rendering plugins and their settings.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    pub enabled: bool,
    #[serde(default)]
    pub settings: Value,
}

impl PluginEntry {
    fn new(enabled: bool, settings: Value) -> Self {
        Self { enabled, settings }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginsState {
    pub plugins: BTreeMap<String, PluginEntry>,
}

impl Default for PluginsState {
    fn default() -> Self {
        let plugins = [
            ("highlight", PluginEntry::new(true, json!({"theme": "github"}))),
            ("mermaid", PluginEntry::new(true, json!({"theme": "default"}))),
            ("katex", PluginEntry::new(false, json!({"displayMode": false}))),
            ("checkbox", PluginEntry::new(true, json!({}))),
        ]
        .into_iter()
        .map(|(id, entry)| (id.to_string(), entry))
        .collect();
        Self { plugins }
    }
}

impl PluginsState {
    pub fn is_enabled(&self, id: &str) -> bool {
        self.plugins.get(id).map(|p| p.enabled).unwrap_or(false)
    }

    pub fn enabled(&self) -> Vec<&str> {
        self.plugins
            .iter()
            .filter(|(_, p)| p.enabled)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}
