//! UI State

use serde::{Deserialize, Serialize};

pub const SIDEBAR_MIN_WIDTH: u16 = 180;
pub const SIDEBAR_MAX_WIDTH: u16 = 640;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Which panes are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Editor,
    Preview,
    #[default]
    Split,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub sidebar_visible: bool,
    pub sidebar_width: u16,
    /// Scroll the preview along with the editor
    pub scroll_sync: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            view_mode: ViewMode::default(),
            sidebar_visible: true,
            sidebar_width: 280,
            scroll_sync: true,
        }
    }
}
