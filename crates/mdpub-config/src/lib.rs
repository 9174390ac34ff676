//! Configuration and durable storage for mdpub
//!
//! This crate provides:
//! - Directory utilities for config, data and cache files
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)
//! - Key/value storage backends for persisted slices
//! - The versioned record envelope slices are stored in

pub mod app_config;
pub mod config_file;
pub mod paths;
pub mod record;
pub mod storage;

pub use app_config::{AppConfig, ContentConfig, DevToolsConfig, PersistenceConfig};
pub use config_file::load_config_file;
pub use paths::{cache_dir, config_dir, data_dir, storage_dir};
pub use record::{PersistedRecord, RecordError, RecordFormat, RECORD_VERSION};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
