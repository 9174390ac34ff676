//! Path State
//!
//! The file browser distinguishes the path the user asked for from the
//! directory that was actually listed: selecting a file lists its parent.

use serde::{Deserialize, Serialize};

/// Contents of one listed directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub pathname: String,
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "error")]
pub enum ListingStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathState {
    /// Path the user requested (file or directory)
    pub current_pathname: Option<String>,
    pub is_directory_selected: bool,
    /// Directory listing backing the browser; for a file request this is the parent
    pub current_listing: Option<DirectoryListing>,
    pub status: ListingStatus,
}

impl PathState {
    /// The selected file, when the current request is for a file
    pub fn selected_file(&self) -> Option<&str> {
        match (&self.current_pathname, self.is_directory_selected) {
            (Some(path), false) => Some(path),
            _ => None,
        }
    }
}

/// Parent directory of a slash separated path
///
/// `"/a/b/file.md"` → `"/a/b"`, `"/file.md"` → `"/"`, `"file.md"` → `""`.
pub fn parent_directory(pathname: &str) -> String {
    let trimmed = pathname.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
        None => String::new(),
    }
}

/// Directory that has to be listed to show `pathname`
pub fn listing_path_for(pathname: &str, is_directory: bool) -> String {
    if is_directory {
        pathname.to_string()
    } else {
        parent_directory(pathname)
    }
}
