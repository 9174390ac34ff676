//! Panels State
//!
//! Registry of sidebar panels. Panels are keyed by id so that a persisted
//! registry merges with newly shipped built-in panels instead of hiding them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in panels registered on a fresh start: (id, title)
pub const BUILTIN_PANELS: [(&str, &str); 6] = [
    ("file-browser", "Files"),
    ("design-tokens", "Design Tokens"),
    ("theme-selector", "Theme"),
    ("dom-inspector", "DOM Inspector"),
    ("console-log", "Console"),
    ("cli", "CLI"),
];

/// A registered panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelEntry {
    pub id: String,
    pub title: String,
    pub visible: bool,
    pub collapsed: bool,
    /// Position in the sidebar, lower first
    pub order: usize,
    /// Whether the panel widget is currently mounted (runtime only)
    #[serde(skip)]
    pub mounted: bool,
}

impl PanelEntry {
    pub fn new(id: &str, title: &str, order: usize) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            visible: true,
            collapsed: false,
            order,
            mounted: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelsState {
    pub panels: BTreeMap<String, PanelEntry>,
    /// Panel that currently has focus
    pub active: Option<String>,
}

impl Default for PanelsState {
    fn default() -> Self {
        let panels = BUILTIN_PANELS
            .iter()
            .enumerate()
            .map(|(order, (id, title))| (id.to_string(), PanelEntry::new(id, title, order)))
            .collect();
        Self {
            panels,
            active: None,
        }
    }
}

impl PanelsState {
    /// Panels in sidebar order (ties broken by id)
    pub fn ordered(&self) -> Vec<&PanelEntry> {
        let mut panels: Vec<&PanelEntry> = self.panels.values().collect();
        panels.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        panels
    }

    /// Visible panels in sidebar order
    pub fn visible(&self) -> Vec<&PanelEntry> {
        self.ordered().into_iter().filter(|p| p.visible).collect()
    }

    pub fn get(&self, id: &str) -> Option<&PanelEntry> {
        self.panels.get(id)
    }

    pub(crate) fn next_order(&self) -> usize {
        self.panels
            .values()
            .map(|p| p.order + 1)
            .max()
            .unwrap_or(0)
    }
}
