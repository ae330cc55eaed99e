//! Process-local adapter. Non-durable; lifetime = process.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::model::Feature;

use super::FeatureStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Feature>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start pre-populated, skipping the repository's seed-on-empty path.
    pub fn with_features(features: Vec<Feature>) -> Self {
        Self {
            items: RwLock::new(features),
        }
    }
}

#[async_trait]
impl FeatureStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Feature>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn save(&self, features: &[Feature]) -> Result<(), StoreError> {
        *self.items.write().await = features.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_features;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let store = MemoryStore::new();
        let features = seed_features();
        store.save(&features).await.unwrap();
        assert_eq!(store.load().await.unwrap(), features);
    }

    #[tokio::test]
    async fn test_save_overwrites_wholesale() {
        let store = MemoryStore::with_features(seed_features());
        store.save(&[]).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}
