//! Remote object-store adapter.
//!
//! The collection lives as a single blob at `{base_url}/features.json`,
//! authenticated with a bearer token. Reads after a write may briefly
//! return the previous blob (the store is eventually consistent); the
//! repository's read-modify-write cycle tolerates that the same way it
//! tolerates any stale read.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::warn;

use crate::error::StoreError;
use crate::model::Feature;

use super::FeatureStore;

const BLOB_KEY: &str = "features.json";

pub struct BlobStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl BlobStore {
    /// Both the endpoint and the token are required. A missing value is
    /// a configuration error, not an empty collection.
    pub fn new(base_url: Option<String>, token: Option<String>) -> Result<Self, StoreError> {
        let base_url = base_url
            .filter(|s| !s.is_empty())
            .ok_or(StoreError::MissingCredentials)?;
        let token = token
            .filter(|s| !s.is_empty())
            .ok_or(StoreError::MissingCredentials)?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        })
    }

    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(
            std::env::var("BLOB_STORE_URL").ok(),
            std::env::var("BLOB_READ_WRITE_TOKEN").ok(),
        )
    }

    fn blob_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), BLOB_KEY)
    }
}

#[async_trait]
impl FeatureStore for BlobStore {
    /// An absent blob (404) is a legitimately empty collection. Network
    /// or parse failures are degraded to empty with a logged warning;
    /// they are not retried.
    async fn load(&self) -> Result<Vec<Feature>, StoreError> {
        let response = match self
            .client
            .get(self.blob_url())
            .bearer_auth(&self.token)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "failed to fetch features blob; treating as empty");
                return Ok(Vec::new());
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "blob fetch returned an error status; treating as empty");
                return Ok(Vec::new());
            }
        };

        match response.json().await {
            Ok(features) => Ok(features),
            Err(e) => {
                warn!(error = %e, "failed to parse features blob; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Whole-blob overwrite. Failures surface as a rejected operation.
    async fn save(&self, features: &[Feature]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(features)?;
        self.client
            .put(self.blob_url())
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
