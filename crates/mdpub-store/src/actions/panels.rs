//! Panel registry actions

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// Actions for the sidebar panel registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
#[serde(
    tag = "verb",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[strum(serialize_all = "camelCase")]
pub enum PanelsAction {
    Register { id: String, title: String },
    Unregister { id: String },
    /// Panel widget was attached to the sidebar
    Mount { id: String },
    /// Panel widget was detached from the sidebar
    Unmount { id: String },
    SetVisible { id: String, visible: bool },
    ToggleVisible { id: String },
    SetCollapsed { id: String, collapsed: bool },
    /// New sidebar order; panels not listed keep their relative order after these
    Reorder { ids: Vec<String> },
    SetActive { id: Option<String> },
}
