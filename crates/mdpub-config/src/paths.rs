//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/mdpub/`, `~/.local/share/mdpub/`, `~/.cache/mdpub/`
//! - macOS: `~/Library/Application Support/mdpub/`, `~/Library/Caches/mdpub/`
//! - Windows: `%APPDATA%\mdpub\`, `%LOCALAPPDATA%\mdpub\`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "mdpub";
const STORAGE_DIR: &str = "storage";

/// `<base>/mdpub`, without touching the filesystem
fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    let base = base.with_context(|| format!("Could not determine {} directory", kind))?;
    Ok(base.join(APP_NAME))
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

fn storage_dir_in(data_dir: &Path) -> PathBuf {
    data_dir.join(STORAGE_DIR)
}

/// Get the application config directory
pub fn config_dir() -> Result<PathBuf> {
    ensure_dir(app_dir(dirs::config_dir(), "config")?)
}

/// Get the application data directory
pub fn data_dir() -> Result<PathBuf> {
    ensure_dir(app_dir(dirs::data_dir(), "data")?)
}

/// Get the application cache directory (log files live here in release builds)
pub fn cache_dir() -> Result<PathBuf> {
    ensure_dir(app_dir(dirs::cache_dir(), "cache")?)
}

/// Default directory for persisted slice records
pub fn storage_dir() -> Result<PathBuf> {
    Ok(storage_dir_in(&data_dir()?))
}

/// Get path to app config file inside the config directory
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dir_is_named_after_app() {
        let dir = app_dir(Some(PathBuf::from("/base")), "config").unwrap();
        assert_eq!(dir, PathBuf::from("/base/mdpub"));
        assert!(!dir.exists());
    }

    #[test]
    fn test_app_dir_without_base_fails() {
        let err = app_dir(None, "data").unwrap_err();
        assert_eq!(err.to_string(), "Could not determine data directory");
    }

    #[test]
    fn test_storage_dir_is_below_data_dir() {
        let data = app_dir(Some(PathBuf::from("/base")), "data").unwrap();
        assert_eq!(storage_dir_in(&data), PathBuf::from("/base/mdpub/storage"));
    }

    #[test]
    fn test_ensure_dir_creates_missing_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ensure_dir(tmp.path().join("a/b")).unwrap();
        assert!(dir.is_dir());
    }
}
