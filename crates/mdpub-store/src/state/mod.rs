//! Application State Module
//!
//! Contains the state tree and one state type per slice.

mod app;
mod communications;
mod editor;
mod log_state;
mod panels;
mod path;
mod plugins;
mod publish;
mod ui;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub use app::AppState;
pub use communications::{CommunicationEntry, CommunicationsState, COMMUNICATIONS_CAPACITY};
pub use editor::EditorState;
pub use log_state::{LogEntry, LogFilter, LogLevel, LogState, NewLogEntry, LOG_CAPACITY};
pub use panels::{PanelEntry, PanelsState, BUILTIN_PANELS};
pub use path::{listing_path_for, parent_directory, DirectoryListing, ListingStatus, PathState};
pub use plugins::{PluginEntry, PluginsState};
pub use publish::{PublishMode, PublishRecord, PublishState, PUBLISH_HISTORY_LIMIT};
pub use ui::{Theme, UiState, ViewMode, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH};

/// Top-level slice keys of the state tree
///
/// The set is fixed at compile time. The lowercase name is both the action
/// namespace (`"editor/setContent"`) and the durable storage key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SliceName {
    Editor,
    Panels,
    Log,
    Publish,
    Path,
    Plugins,
    Communications,
    Ui,
}
