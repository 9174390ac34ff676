//! File browser thunks

use std::sync::Arc;

use super::BoxFuture;
use crate::actions::{Action, PathAction};
use crate::listing::DirectoryLister;
use crate::state::{listing_path_for, DirectoryListing};
use crate::store::Store;

/// Fetch the listing backing `pathname`
///
/// Directories are listed themselves; for a file the parent directory is
/// listed and the file stays the selected path. Dispatches
/// `path/fetchListingStart`, then `path/fetchListingSuccess` or
/// `path/fetchListingFailure`, and resolves to the listing or the error.
pub fn fetch_listing_by_path(
    pathname: impl Into<String>,
    is_directory: bool,
    lister: Arc<dyn DirectoryLister>,
) -> impl FnOnce(&Store) -> BoxFuture<'static, anyhow::Result<DirectoryListing>> {
    let pathname = pathname.into();
    move |store: &Store| -> BoxFuture<'static, anyhow::Result<DirectoryListing>> {
        Box::pin(fetch_listing(store.clone(), pathname, is_directory, lister))
    }
}

async fn fetch_listing(
    store: Store,
    pathname: String,
    is_directory: bool,
    lister: Arc<dyn DirectoryLister>,
) -> anyhow::Result<DirectoryListing> {
    store.dispatch(Action::Path(PathAction::FetchListingStart {
        pathname: pathname.clone(),
        is_directory,
    }))?;

    let target = listing_path_for(&pathname, is_directory);
    match lister.list(&target).await {
        Ok(listing) => {
            store.dispatch(Action::Path(PathAction::FetchListingSuccess {
                requested_pathname: pathname,
                listing: listing.clone(),
            }))?;
            Ok(listing)
        }
        Err(e) => {
            log::warn!("Listing {} failed: {}", target, e);
            store.dispatch(Action::Path(PathAction::FetchListingFailure {
                requested_pathname: pathname,
                error: e.to_string(),
            }))?;
            Err(e.into())
        }
    }
}
