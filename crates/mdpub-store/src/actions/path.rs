//! Path (file browser) actions
//!
//! These are dispatched by the `fetch_listing_by_path` thunk; callers normally
//! do not build them by hand.

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::state::DirectoryListing;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
#[serde(
    tag = "verb",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
#[strum(serialize_all = "camelCase")]
pub enum PathAction {
    FetchListingStart {
        pathname: String,
        is_directory: bool,
    },
    FetchListingSuccess {
        requested_pathname: String,
        listing: DirectoryListing,
    },
    FetchListingFailure {
        requested_pathname: String,
        error: String,
    },
}
