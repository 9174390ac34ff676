//! Directory listing for the file browser

use async_trait::async_trait;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::state::DirectoryListing;

#[derive(Debug, Error)]
pub enum ListingError {
    /// The path contains `..` or another component leaving the content root
    #[error("path escapes the content root: {0}")]
    OutsideRoot(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("failed to list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Lists the entries of a directory
///
/// `pathname` is slash separated and relative to whatever root the
/// implementation serves; a leading `/` and the empty path both mean the root.
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    async fn list(&self, pathname: &str) -> Result<DirectoryListing, ListingError>;
}

/// Lists directories below a content root on the local filesystem
///
/// Hidden entries (dot files) are skipped; names are sorted.
#[derive(Debug, Clone)]
pub struct FsDirectoryLister {
    root: PathBuf,
}

impl FsDirectoryLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, pathname: &str) -> Result<PathBuf, ListingError> {
        let relative = Path::new(pathname.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return Err(ListingError::OutsideRoot(pathname.to_string())),
            }
        }
        Ok(resolved)
    }
}

#[async_trait]
impl DirectoryLister for FsDirectoryLister {
    async fn list(&self, pathname: &str) -> Result<DirectoryListing, ListingError> {
        let dir = self.resolve(pathname)?;
        let io_error = |source| ListingError::Io {
            path: pathname.to_string(),
            source,
        };

        let metadata = tokio::fs::metadata(&dir).await.map_err(io_error)?;
        if !metadata.is_dir() {
            return Err(ListingError::NotADirectory(pathname.to_string()));
        }

        let mut entries = tokio::fs::read_dir(&dir).await.map_err(io_error)?;
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if entry.file_type().await.map_err(io_error)?.is_dir() {
                dirs.push(name);
            } else {
                files.push(name);
            }
        }
        dirs.sort();
        files.sort();

        log::debug!(
            "Listed {:?}: {} dirs, {} files",
            dir,
            dirs.len(),
            files.len()
        );
        Ok(DirectoryListing {
            pathname: pathname.to_string(),
            dirs,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn content_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs/guides")).unwrap();
        fs::create_dir_all(dir.path().join("docs/assets")).unwrap();
        fs::write(dir.path().join("docs/intro.md"), "# Intro").unwrap();
        fs::write(dir.path().join("docs/changelog.md"), "# Changes").unwrap();
        fs::write(dir.path().join("docs/.draft.md"), "hidden").unwrap();
        fs::write(dir.path().join("README.md"), "# Readme").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_lists_sorted_entries_without_hidden_files() {
        let root = content_root();
        let lister = FsDirectoryLister::new(root.path());

        let listing = lister.list("/docs").await.unwrap();
        assert_eq!(listing.pathname, "/docs");
        assert_eq!(listing.dirs, vec!["assets", "guides"]);
        assert_eq!(listing.files, vec!["changelog.md", "intro.md"]);
    }

    #[tokio::test]
    async fn test_empty_path_lists_root() {
        let root = content_root();
        let lister = FsDirectoryLister::new(root.path());

        let listing = lister.list("").await.unwrap();
        assert_eq!(listing.dirs, vec!["docs"]);
        assert_eq!(listing.files, vec!["README.md"]);
    }

    #[tokio::test]
    async fn test_parent_components_are_rejected() {
        let root = content_root();
        let lister = FsDirectoryLister::new(root.path());

        let result = lister.list("/docs/../../etc").await;
        assert!(matches!(result, Err(ListingError::OutsideRoot(_))));
    }

    #[tokio::test]
    async fn test_file_and_missing_paths_fail() {
        let root = content_root();
        let lister = FsDirectoryLister::new(root.path());

        assert!(matches!(
            lister.list("/README.md").await,
            Err(ListingError::NotADirectory(_))
        ));
        assert!(matches!(
            lister.list("/missing").await,
            Err(ListingError::Io { .. })
        ));
    }
}
