//! HTTP boundary: translates requests to repository calls and
//! serializes results to JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::error::StoreError;
use crate::model::{Feature, FlagRef, Pillar};
use crate::query::{FeatureQuery, ReleasedFilter, SortOption, StatusFilter};
use crate::repo::FeatureRepo;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub repo: FeatureRepo,
}

pub type SharedState = Arc<AppState>;

/// Configuration for the catalog server.
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8800,
            dev_mode: false,
        }
    }
}

// ── Request/response payload types ────────────────────────────────────

#[derive(Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
    pub released: Option<String>,
    /// Comma-separated pillar display names.
    pub pillars: Option<String>,
    pub sort: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFlagRequest {
    pub feature_id: String,
    pub flag: FlagRef,
}

#[derive(Serialize)]
pub struct FeaturesResponse {
    pub features: Vec<Feature>,
}

#[derive(Serialize)]
pub struct FeatureResponse {
    pub feature: Feature,
    pub features: Vec<Feature>,
}

// ── Error handling ────────────────────────────────────────────────────

pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateId(_) => ApiError::Conflict(e.to_string()),
            StoreError::MissingCredentials => ApiError::Unavailable(e.to_string()),
            _ => ApiError::Internal(e.to_string()),
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/features",
            get(list_features)
                .post(create_feature)
                .put(replace_feature)
                .delete(delete_feature),
        )
        .route("/api/features/flags", post(add_flag))
        .route("/api/features/{id}", get(get_feature))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

fn parse_query(params: &ListParams) -> Result<FeatureQuery, ApiError> {
    let status = match &params.status {
        Some(s) => s.parse::<StatusFilter>().map_err(ApiError::BadRequest)?,
        None => StatusFilter::All,
    };
    let released = match &params.released {
        Some(s) => s.parse::<ReleasedFilter>().map_err(ApiError::BadRequest)?,
        None => ReleasedFilter::All,
    };
    let pillars = match &params.pillars {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<Pillar>().map_err(ApiError::BadRequest))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    let sort = match &params.sort {
        Some(s) => Some(s.parse::<SortOption>().map_err(ApiError::BadRequest)?),
        None => None,
    };
    Ok(FeatureQuery {
        status,
        released,
        pillars,
        sort,
    })
}

async fn list_features(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = parse_query(&params)?;
    let features = state.repo.get_all().await?;
    let features = query.apply(&features);
    Ok(Json(FeaturesResponse { features }))
}

async fn get_feature(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let feature = state.repo.get_by_id(&id).await?;
    match feature {
        Some(feature) => Ok(Json(serde_json::json!({ "feature": feature }))),
        None => Err(ApiError::NotFound(format!("Feature '{}' not found", id))),
    }
}

async fn create_feature(
    State(state): State<SharedState>,
    Json(feature): Json<Feature>,
) -> Result<impl IntoResponse, ApiError> {
    if feature.id.is_empty() {
        return Err(ApiError::BadRequest("Feature id is required".to_string()));
    }
    let feature = state.repo.add(feature).await?;
    let features = state.repo.get_all().await?;
    Ok((
        StatusCode::CREATED,
        Json(FeatureResponse { feature, features }),
    ))
}

async fn replace_feature(
    State(state): State<SharedState>,
    Json(feature): Json<Feature>,
) -> Result<impl IntoResponse, ApiError> {
    if feature.id.is_empty() {
        return Err(ApiError::BadRequest("Feature id is required".to_string()));
    }
    let feature = state.repo.update(feature).await?;
    let features = state.repo.get_all().await?;
    Ok(Json(FeatureResponse { feature, features }))
}

async fn delete_feature(
    State(state): State<SharedState>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Feature id is required".to_string()))?;

    let removed = state.repo.remove(&id).await?;
    if !removed {
        return Err(ApiError::NotFound(format!("Feature '{}' not found", id)));
    }
    let features = state.repo.get_all().await?;
    Ok(Json(FeaturesResponse { features }))
}

async fn add_flag(
    State(state): State<SharedState>,
    Json(req): Json<AddFlagRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.feature_id.is_empty() {
        return Err(ApiError::BadRequest(
            "featureId and flag are required".to_string(),
        ));
    }
    let feature = state.repo.add_flag(&req.feature_id, req.flag).await?;
    let Some(feature) = feature else {
        return Err(ApiError::NotFound(format!(
            "Feature '{}' not found",
            req.feature_id
        )));
    };
    let features = state.repo.get_all().await?;
    Ok(Json(FeatureResponse { feature, features }))
}

// ── Server lifecycle ──────────────────────────────────────────────────

/// Start the catalog server and block until shutdown.
pub async fn start_server(config: ServerConfig, repo: FeatureRepo) -> Result<()> {
    let state = Arc::new(AppState { repo });

    let mut app = api_router().with_state(state);
    if config.dev_mode {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "protodeck catalog listening");
    println!("Protodeck running at http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    println!("Server shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    println!("\nShutting down...");
}
