//! Publish Reducer

use std::sync::Arc;

use crate::actions::{Action, PublishAction};
use crate::state::{PublishRecord, PublishState};

pub fn reduce(state: &Arc<PublishState>, action: &Action) -> Arc<PublishState> {
    match action {
        Action::Publish(action) => super::apply(state, |s| reduce_publish(s, action)),
        _ => Arc::clone(state),
    }
}

pub fn reduce_publish(mut state: PublishState, action: &PublishAction) -> PublishState {
    match action {
        PublishAction::SetMode { mode } => state.mode = *mode,
        PublishAction::SetBaseUrl { url } => {
            state.base_url = url.clone().filter(|u| !u.trim().is_empty());
        }
        PublishAction::StartPublishing { file } => {
            state.in_progress = true;
            state.current_file = file.clone();
        }
        PublishAction::FinishPublishing {
            timestamp,
            success,
            error,
            file_count,
        } => {
            if !state.in_progress {
                log::debug!("Publish finished without a matching start");
            }
            state.in_progress = false;
            let record = PublishRecord {
                timestamp: *timestamp,
                mode: state.mode,
                success: *success,
                error: error.clone(),
                file_count: *file_count,
                file: state.current_file.take(),
            };
            state.record(record);
        }
        PublishAction::ClearHistory => {
            state.history.clear();
            state.last_result = None;
        }
    }
    state
}
