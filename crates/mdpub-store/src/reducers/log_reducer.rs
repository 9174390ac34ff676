//! Console Log Reducer

use std::sync::Arc;

use crate::actions::{Action, LogAction};
use crate::state::LogState;

pub fn reduce(state: &Arc<LogState>, action: &Action) -> Arc<LogState> {
    match action {
        Action::Log(action) => super::apply(state, |s| reduce_log(s, action)),
        _ => Arc::clone(state),
    }
}

/// Reducer for the console log ring buffer.
pub fn reduce_log(mut state: LogState, action: &LogAction) -> LogState {
    match action {
        LogAction::AddEntry(entry) => state.push(entry.clone()),
        LogAction::Clear => {
            state.entries.clear();
            state.discovered_types.clear();
        }
        LogAction::SetFilter(filter) => state.filter = filter.clone(),
    }
    state
}
