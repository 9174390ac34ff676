//! Application State

use serde_json::Value;
use std::sync::Arc;

use super::{
    CommunicationsState, EditorState, LogState, PanelsState, PathState, PluginsState,
    PublishState, SliceName, UiState,
};

/// The whole state tree
///
/// Every slice sits behind an `Arc`. Reducers hand back the same `Arc` for
/// actions that do not concern them, so change detection is a pointer
/// comparison per slice and cloning the tree is cheap.
#[derive(Clone, Default, PartialEq)]
pub struct AppState {
    pub editor: Arc<EditorState>,
    pub panels: Arc<PanelsState>,
    pub log: Arc<LogState>,
    pub publish: Arc<PublishState>,
    pub path: Arc<PathState>,
    pub plugins: Arc<PluginsState>,
    pub communications: Arc<CommunicationsState>,
    pub ui: Arc<UiState>,
}

impl AppState {
    /// Slices whose `Arc` differs from `prev`, in declaration order
    pub fn changed_slices(&self, prev: &AppState) -> Vec<SliceName> {
        let checks = [
            (SliceName::Editor, Arc::ptr_eq(&self.editor, &prev.editor)),
            (SliceName::Panels, Arc::ptr_eq(&self.panels, &prev.panels)),
            (SliceName::Log, Arc::ptr_eq(&self.log, &prev.log)),
            (SliceName::Publish, Arc::ptr_eq(&self.publish, &prev.publish)),
            (SliceName::Path, Arc::ptr_eq(&self.path, &prev.path)),
            (SliceName::Plugins, Arc::ptr_eq(&self.plugins, &prev.plugins)),
            (
                SliceName::Communications,
                Arc::ptr_eq(&self.communications, &prev.communications),
            ),
            (SliceName::Ui, Arc::ptr_eq(&self.ui, &prev.ui)),
        ];
        checks
            .into_iter()
            .filter(|(_, same)| !same)
            .map(|(slice, _)| slice)
            .collect()
    }

    /// JSON projection of one slice, as written to durable storage
    pub fn slice_json(&self, slice: SliceName) -> Result<Value, serde_json::Error> {
        match slice {
            SliceName::Editor => serde_json::to_value(&*self.editor),
            SliceName::Panels => serde_json::to_value(&*self.panels),
            SliceName::Log => serde_json::to_value(&*self.log),
            SliceName::Publish => serde_json::to_value(&*self.publish),
            SliceName::Path => serde_json::to_value(&*self.path),
            SliceName::Plugins => serde_json::to_value(&*self.plugins),
            SliceName::Communications => serde_json::to_value(&*self.communications),
            SliceName::Ui => serde_json::to_value(&*self.ui),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("editor", &self.editor)
            .field("panels", &self.panels)
            .field("log", &format!("{} entries", self.log.entries.len()))
            .field("publish", &self.publish)
            .field("path", &self.path)
            .field("plugins", &self.plugins)
            .field(
                "communications",
                &format!("{} entries", self.communications.entries.len()),
            )
            .field("ui", &self.ui)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_every_slice() {
        let state = AppState::default();
        let copy = state.clone();
        assert!(copy.changed_slices(&state).is_empty());
    }

    #[test]
    fn test_changed_slices_uses_identity_not_equality() {
        let state = AppState::default();
        let mut next = state.clone();
        // Equal value, new allocation: still reported as changed
        next.ui = Arc::new(UiState::default());
        assert_eq!(next.changed_slices(&state), vec![SliceName::Ui]);
    }

    #[test]
    fn test_slice_json() {
        let state = AppState::default();
        let ui = state.slice_json(SliceName::Ui).unwrap();
        assert_eq!(ui["theme"], "system");
        assert_eq!(ui["sidebarWidth"], 280);
    }
}
