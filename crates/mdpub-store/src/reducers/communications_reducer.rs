//! Communications Reducer

use std::sync::Arc;

use crate::actions::{Action, CommunicationsAction};
use crate::state::CommunicationsState;

pub fn reduce(state: &Arc<CommunicationsState>, action: &Action) -> Arc<CommunicationsState> {
    match action {
        Action::Communications(action) => {
            super::apply(state, |s| reduce_communications(s, action))
        }
        _ => Arc::clone(state),
    }
}

pub fn reduce_communications(
    mut state: CommunicationsState,
    action: &CommunicationsAction,
) -> CommunicationsState {
    match action {
        CommunicationsAction::LogAction(entry) => state.push(entry.clone()),
        CommunicationsAction::Clear => state.entries.clear(),
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CommunicationEntry, COMMUNICATIONS_CAPACITY};
    use chrono::Utc;
    use serde_json::json;

    fn entry(action_type: &str, n: usize) -> CommunicationsAction {
        CommunicationsAction::LogAction(CommunicationEntry {
            action_type: action_type.to_string(),
            payload: Some(json!({ "n": n })),
            timestamp: Utc::now(),
        })
    }

    #[test]
    fn test_trace_is_bounded() {
        let mut state = CommunicationsState::default();
        for n in 0..COMMUNICATIONS_CAPACITY + 5 {
            state = reduce_communications(state, &entry("ui/toggleSidebar", n));
        }
        assert_eq!(state.entries.len(), COMMUNICATIONS_CAPACITY);
        assert_eq!(state.entries[0].payload, Some(json!({"n": 5})));
    }

    #[test]
    fn test_last_of_and_clear() {
        let state = reduce_communications(CommunicationsState::default(), &entry("a/x", 1));
        let state = reduce_communications(state, &entry("b/y", 2));
        let state = reduce_communications(state, &entry("a/x", 3));
        assert_eq!(
            state.last_of("a/x").unwrap().payload,
            Some(json!({"n": 3}))
        );

        let state = reduce_communications(state, &CommunicationsAction::Clear);
        assert!(state.entries.is_empty());
    }
}
