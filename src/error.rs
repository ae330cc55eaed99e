use thiserror::Error;

/// Failures surfaced by the persistence adapters and the repository.
///
/// Load-path I/O problems are generally degraded to an empty collection
/// by the adapters themselves (with a logged warning), so callers mostly
/// see the save-path and contract-violation variants.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("blob request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse stored features: {0}")]
    Parse(#[from] serde_json::Error),

    /// The blob backend was selected but no credentials are configured.
    /// Deliberately distinct from "the collection is empty".
    #[error("blob store credentials not configured (set BLOB_STORE_URL and BLOB_READ_WRITE_TOKEN)")]
    MissingCredentials,

    #[error("a feature with id '{0}' already exists")]
    DuplicateId(String),
}
