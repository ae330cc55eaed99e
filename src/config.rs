//! Layered configuration: `protodeck.toml` → environment → CLI flags.
//!
//! # Configuration File Format
//!
//! ```toml
//! [storage]
//! backend = "file"            # memory | file | blob
//! path = "data/features.json" # file backend only
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8800
//! dev_mode = false
//! ```
//!
//! The blob backend reads `BLOB_STORE_URL` and `BLOB_READ_WRITE_TOKEN`
//! from the environment (a `.env` file is honored).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{BlobStore, FeatureStore, FileStore, MemoryStore, StorageBackend};

pub const CONFIG_FILE: &str = "protodeck.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_data_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub dev_mode: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dev_mode: false,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/features.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8800
}

impl CatalogConfig {
    /// Load from an explicit path, or `protodeck.toml` in the current
    /// directory if present, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    fn apply_env(&mut self) {
        if let Ok(backend) = std::env::var("PROTODECK_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(backend) => self.storage.backend = backend,
                Err(e) => tracing::warn!("ignoring PROTODECK_STORAGE_BACKEND: {}", e),
            }
        }
        if let Ok(path) = std::env::var("PROTODECK_DATA_PATH") {
            self.storage.path = PathBuf::from(path);
        }
        if let Ok(host) = std::env::var("PROTODECK_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PROTODECK_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("ignoring non-numeric PROTODECK_PORT: {}", port),
            }
        }
    }

    /// Construct the persistence adapter this process is wired to.
    pub fn build_store(&self) -> Result<Arc<dyn FeatureStore>, StoreError> {
        let store: Arc<dyn FeatureStore> = match self.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::new(&self.storage.path)),
            StorageBackend::Blob => Arc::new(BlobStore::from_env()?),
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.path, PathBuf::from("data/features.json"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8800);
        assert!(!config.server.dev_mode);
    }

    #[test]
    fn test_parse_full_file() {
        let raw = r#"
            [storage]
            backend = "memory"
            path = "elsewhere/features.json"

            [server]
            host = "0.0.0.0"
            port = 9000
            dev_mode = true
        "#;
        let config: CatalogConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.path, PathBuf::from("elsewhere/features.json"));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(config.server.dev_mode);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let raw = r#"
            [storage]
            backend = "blob"
        "#;
        let config: CatalogConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Blob);
        assert_eq!(config.storage.path, PathBuf::from("data/features.json"));
        assert_eq!(config.server.port, 8800);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: CatalogConfig = toml::from_str("").unwrap();
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn test_build_store_memory_and_file() {
        let mut config = CatalogConfig::default();
        config.storage.backend = StorageBackend::Memory;
        assert!(config.build_store().is_ok());
        config.storage.backend = StorageBackend::File;
        assert!(config.build_store().is_ok());
    }
}
