//! Persistence adapters: memory, local file, remote blob.
//!
//! Every adapter round-trips the full collection as one opaque JSON
//! array. There are no partial reads or writes, and no concurrent-writer
//! conflict detection; the last `save` wins.

pub mod blob;
pub mod file;
pub mod memory;

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::Feature;

pub use blob::BlobStore;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage-medium-specific load/save implementation.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Read the full collection. Adapters degrade unreadable or missing
    /// data to an empty collection; only configuration errors surface.
    async fn load(&self) -> Result<Vec<Feature>, StoreError>;

    /// Overwrite the stored representation with the given collection.
    async fn save(&self, features: &[Feature]) -> Result<(), StoreError>;
}

/// Which adapter the process is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    Blob,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Blob => "blob",
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "blob" => Ok(Self::Blob),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_roundtrip() {
        for s in &["memory", "file", "blob"] {
            let parsed: StorageBackend = s.parse().unwrap();
            assert_eq!(parsed.as_str(), *s);
        }
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_backend_default_is_file() {
        assert_eq!(StorageBackend::default(), StorageBackend::File);
    }
}
