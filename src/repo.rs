//! CRUD over the persistence adapter.
//!
//! Every operation is a fresh load-modify-save cycle against the
//! injected store; no in-memory cache is kept between calls. Two
//! concurrent writers against the same durable store can therefore
//! race, and the last save wins (see DESIGN.md).

use std::sync::Arc;

use tracing::info;

use crate::error::StoreError;
use crate::model::{Feature, FlagRef};
use crate::seed::seed_features;
use crate::store::FeatureStore;

#[derive(Clone)]
pub struct FeatureRepo {
    store: Arc<dyn FeatureStore>,
}

impl FeatureRepo {
    pub fn new(store: Arc<dyn FeatureStore>) -> Self {
        Self { store }
    }

    /// Load the collection, seeding the store on first empty load.
    /// Idempotent after the first run.
    async fn load_or_seed(&self) -> Result<Vec<Feature>, StoreError> {
        let features = self.store.load().await?;
        if !features.is_empty() {
            return Ok(features);
        }
        let seeded = seed_features();
        self.store.save(&seeded).await?;
        info!(count = seeded.len(), "seeded empty feature store");
        Ok(seeded)
    }

    pub async fn get_all(&self) -> Result<Vec<Feature>, StoreError> {
        self.load_or_seed().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Feature>, StoreError> {
        let features = self.get_all().await?;
        Ok(features.into_iter().find(|f| f.id == id))
    }

    /// Append a new feature. Duplicate ids are rejected.
    pub async fn add(&self, feature: Feature) -> Result<Feature, StoreError> {
        let mut features = self.get_all().await?;
        if features.iter().any(|f| f.id == feature.id) {
            return Err(StoreError::DuplicateId(feature.id));
        }
        features.push(feature.clone());
        self.store.save(&features).await?;
        Ok(feature)
    }

    /// Replace the element whose id matches. An unknown id leaves the
    /// collection unchanged; the input is returned either way.
    pub async fn update(&self, feature: Feature) -> Result<Feature, StoreError> {
        let mut features = self.get_all().await?;
        for existing in features.iter_mut() {
            if existing.id == feature.id {
                *existing = feature.clone();
            }
        }
        self.store.save(&features).await?;
        Ok(feature)
    }

    /// Append a flag to a feature's `flag_refs`. Returns `None` without
    /// mutating anything when the id is unknown.
    pub async fn add_flag(
        &self,
        feature_id: &str,
        flag: FlagRef,
    ) -> Result<Option<Feature>, StoreError> {
        let Some(mut feature) = self.get_by_id(feature_id).await? else {
            return Ok(None);
        };
        feature.flag_refs.push(flag);
        let updated = self.update(feature).await?;
        Ok(Some(updated))
    }

    /// Remove by id. Persists only if something was actually removed;
    /// returns whether it was.
    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let features = self.get_all().await?;
        let before = features.len();
        let remaining: Vec<Feature> = features.into_iter().filter(|f| f.id != id).collect();
        let removed = remaining.len() != before;
        if removed {
            self.store.save(&remaining).await?;
        }
        Ok(removed)
    }
}
