//! Local JSON file adapter. Durable, single-writer assumed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use crate::error::StoreError;
use crate::model::Feature;

use super::FeatureStore;

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FeatureStore for FileStore {
    /// A missing file is a legitimately empty collection. Unreadable or
    /// unparsable content fails closed to empty with a logged warning.
    async fn load(&self) -> Result<Vec<Feature>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read features file; treating as empty");
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(features) => Ok(features),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to parse features file; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Whole-file overwrite, pretty-printed. Parent directories are
    /// created on demand.
    async fn save(&self, features: &[Feature]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(features)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_features;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("features.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("features.json"));
        let features = seed_features();
        store.save(&features).await.unwrap();
        assert_eq!(store.load().await.unwrap(), features);
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data/nested/features.json"));
        store.save(&seed_features()).await.unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("features.json");
        std::fs::write(&path, "{ not json []").unwrap();
        let store = FileStore::new(&path);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persisted_form_is_pretty_printed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("features.json");
        let store = FileStore::new(&path);
        store.save(&seed_features()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n"));
        assert!(raw.contains("  {"));
        assert!(raw.contains("\"id\": \"raz-sleep-journal\""));
    }

    #[tokio::test]
    async fn test_save_overwrites_not_appends() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("features.json"));
        store.save(&seed_features()).await.unwrap();
        let one = vec![seed_features().remove(0)];
        store.save(&one).await.unwrap();
        assert_eq!(store.load().await.unwrap(), one);
    }
}
