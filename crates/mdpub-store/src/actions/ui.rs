//! UI actions

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::state::{Theme, ViewMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
#[serde(
    tag = "verb",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[strum(serialize_all = "camelCase")]
pub enum UiAction {
    SetTheme { theme: Theme },
    SetViewMode { mode: ViewMode },
    ToggleSidebar,
    /// Clamped to the allowed sidebar width range
    SetSidebarWidth { width: u16 },
    ToggleScrollSync,
}
