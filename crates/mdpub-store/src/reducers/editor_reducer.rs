//! Editor Reducer

use std::sync::Arc;

use crate::actions::{Action, EditorAction};
use crate::state::EditorState;

pub fn reduce(state: &Arc<EditorState>, action: &Action) -> Arc<EditorState> {
    match action {
        Action::Editor(action) => super::apply(state, |s| reduce_editor(s, action)),
        _ => Arc::clone(state),
    }
}

/// Reducer for editor state.
pub fn reduce_editor(mut state: EditorState, action: &EditorAction) -> EditorState {
    match action {
        EditorAction::SetContent { content } => {
            if *content != state.content {
                state.content = content.clone();
                state.dirty = true;
                state.cursor = state.cursor.min(state.char_len());
            }
        }
        EditorAction::OpenFile { path, content } => {
            log::debug!("Opening {} in editor", path);
            state.file_path = Some(path.clone());
            state.content = content.clone();
            state.cursor = 0;
            state.dirty = false;
        }
        EditorAction::SetCursor { position } => {
            state.cursor = (*position).min(state.char_len());
        }
        EditorAction::MarkSaved { timestamp } => {
            state.dirty = false;
            state.last_saved = Some(*timestamp);
        }
    }
    state
}
