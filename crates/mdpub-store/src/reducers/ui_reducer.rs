//! UI Reducer

use std::sync::Arc;

use crate::actions::{Action, UiAction};
use crate::state::{UiState, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH};

pub fn reduce(state: &Arc<UiState>, action: &Action) -> Arc<UiState> {
    match action {
        Action::Ui(action) => super::apply(state, |s| reduce_ui(s, action)),
        _ => Arc::clone(state),
    }
}

pub fn reduce_ui(mut state: UiState, action: &UiAction) -> UiState {
    match action {
        UiAction::SetTheme { theme } => state.theme = *theme,
        UiAction::SetViewMode { mode } => state.view_mode = *mode,
        UiAction::ToggleSidebar => state.sidebar_visible = !state.sidebar_visible,
        UiAction::SetSidebarWidth { width } => {
            state.sidebar_width = (*width).clamp(SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH);
        }
        UiAction::ToggleScrollSync => state.scroll_sync = !state.scroll_sync,
    }
    state
}
