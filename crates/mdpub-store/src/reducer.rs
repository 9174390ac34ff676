use crate::actions::Action;
use crate::reducers::{
    communications_reducer, editor_reducer, log_reducer, panels_reducer, path_reducer,
    plugins_reducer, publish_reducer, ui_reducer,
};
use crate::state::AppState;

/// Signature shared by the root reducer and test doubles handed to the store
pub type RootReducer = dyn Fn(&AppState, &Action) -> AppState + Send + Sync;

/// Reducer - pure function that produces new state from current state + action
/// This is the root reducer that fans the action out to every slice reducer
///
/// Slices that do not handle the action keep their `Arc`, so
/// [`AppState::changed_slices`] only reports the slices that really changed.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    AppState {
        editor: editor_reducer::reduce(&state.editor, action),
        panels: panels_reducer::reduce(&state.panels, action),
        log: log_reducer::reduce(&state.log, action),
        publish: publish_reducer::reduce(&state.publish, action),
        path: path_reducer::reduce(&state.path, action),
        plugins: plugins_reducer::reduce(&state.plugins, action),
        communications: communications_reducer::reduce(&state.communications, action),
        ui: ui_reducer::reduce(&state.ui, action),
    }
}
