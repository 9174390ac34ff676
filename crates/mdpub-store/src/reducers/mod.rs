//! Slice reducers
//!
//! Each module exposes `reduce(&Arc<S>, &Action) -> Arc<S>` for the root
//! combinator and a typed `reduce_<slice>` that only sees its own actions.

pub mod communications_reducer;
pub mod editor_reducer;
pub mod log_reducer;
pub mod panels_reducer;
pub mod path_reducer;
pub mod plugins_reducer;
pub mod publish_reducer;
pub mod ui_reducer;

use std::sync::Arc;

/// Run `reduce` on a copy of the slice and keep the old `Arc` when the
/// result is equal, so no-op actions never look like changes.
pub(crate) fn apply<S, F>(state: &Arc<S>, reduce: F) -> Arc<S>
where
    S: Clone + PartialEq,
    F: FnOnce(S) -> S,
{
    let next = reduce(S::clone(state));
    if next == **state {
        Arc::clone(state)
    } else {
        Arc::new(next)
    }
}
