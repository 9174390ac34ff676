//! Path Reducer
//!
//! Listing results carry the pathname they were requested for. A result for
//! anything but the current request is stale and dropped.

use std::sync::Arc;

use crate::actions::{Action, PathAction};
use crate::state::{ListingStatus, PathState};

pub fn reduce(state: &Arc<PathState>, action: &Action) -> Arc<PathState> {
    match action {
        Action::Path(action) => super::apply(state, |s| reduce_path(s, action)),
        _ => Arc::clone(state),
    }
}

pub fn reduce_path(mut state: PathState, action: &PathAction) -> PathState {
    match action {
        PathAction::FetchListingStart {
            pathname,
            is_directory,
        } => {
            state.current_pathname = Some(pathname.clone());
            state.is_directory_selected = *is_directory;
            state.status = ListingStatus::Loading;
        }
        PathAction::FetchListingSuccess {
            requested_pathname,
            listing,
        } => {
            if is_current(&state, requested_pathname) {
                state.current_listing = Some(listing.clone());
                state.status = ListingStatus::Loaded;
            } else {
                log::debug!("Dropping stale listing for {}", requested_pathname);
            }
        }
        PathAction::FetchListingFailure {
            requested_pathname,
            error,
        } => {
            if is_current(&state, requested_pathname) {
                state.status = ListingStatus::Failed(error.clone());
            } else {
                log::debug!("Dropping stale listing error for {}", requested_pathname);
            }
        }
    }
    state
}

fn is_current(state: &PathState, requested: &str) -> bool {
    state.current_pathname.as_deref() == Some(requested)
}
