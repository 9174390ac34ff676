//! Application configuration
//!
//! Configuration loaded from `.mdpub.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration loaded from `.mdpub.toml`
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub persistence: PersistenceConfig,

    #[serde(default)]
    pub devtools: DevToolsConfig,

    #[serde(default)]
    pub content: ContentConfig,
}

/// Durable write-through settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PersistenceConfig {
    /// Quiet period before a burst of changes is written out
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Slices written by the debounced persistence middleware
    #[serde(default = "default_persisted_slices")]
    pub slices: Vec<String>,

    /// Overrides the platform data directory for slice records
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

/// Diagnostic middleware settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DevToolsConfig {
    #[serde(default = "default_devtools_enabled")]
    pub enabled: bool,

    /// Reducer runs slower than this are reported as slow actions
    #[serde(default = "default_slow_action_threshold_ms")]
    pub slow_action_threshold_ms: u64,
}

/// Where the file browser lists markdown content from
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ContentConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_persisted_slices() -> Vec<String> {
    ["editor", "panels", "plugins", "ui"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_devtools_enabled() -> bool {
    true
}

fn default_slow_action_threshold_ms() -> u64 {
    10
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            slices: default_persisted_slices(),
            storage_dir: None,
        }
    }
}

impl Default for DevToolsConfig {
    fn default() -> Self {
        Self {
            enabled: default_devtools_enabled(),
            slow_action_threshold_ms: default_slow_action_threshold_ms(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Resolve the directory used for slice records
    pub fn storage_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.persistence.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => crate::paths::storage_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.persistence.debounce_ms, 1000);
        assert_eq!(
            config.persistence.slices,
            vec!["editor", "panels", "plugins", "ui"]
        );
        assert!(config.devtools.enabled);
        assert_eq!(config.devtools.slow_action_threshold_ms, 10);
        assert!(config.content.root.is_none());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            [persistence]
            debounce_ms = 250

            [devtools]
            enabled = false
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.persistence.debounce_ms, 250);
        // Missing keys fall back to defaults
        assert_eq!(config.persistence.slices.len(), 4);
        assert!(!config.devtools.enabled);
        assert_eq!(config.devtools.slow_action_threshold_ms, 10);
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_storage_dir_override() {
        let toml = r#"
            [persistence]
            storage_dir = "/tmp/mdpub-test-storage"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.storage_dir().unwrap(),
            PathBuf::from("/tmp/mdpub-test-storage")
        );
    }
}
