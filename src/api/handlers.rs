//! API Handlers
//!
//! HTTP request handlers mapping each endpoint onto one adapter operation.
//! Unreadable JSON bodies surface as `CacheError::InvalidRequest`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::adapter::{Cache, NamespacedCache};
use crate::config::{AdapterConfig, ServerConfig};
use crate::error::{CacheError, Result};
use crate::models::{
    AddRequest, DeleteMultiRequest, DeleteMultiResponse, GetMultiRequest, GetMultiResponse,
    GetResponse, HasResponse, HealthResponse, SetRequest, StatsResponse, WriteResponse,
};
use crate::registry::StoreRegistry;
use crate::store::MemoryStore;

/// Adapter over an in-memory store of JSON values, as served over HTTP.
pub type JsonCache = NamespacedCache<MemoryStore<Value>>;

/// Application state shared across all handlers.
///
/// The adapter needs no lock of its own: the store serializes access.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<JsonCache>,
}

impl AppState {
    /// Creates a new AppState around an adapter.
    pub fn new(cache: JsonCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates the in-memory store and binds an adapter to it through
    /// `registry`.
    pub fn from_config(
        server: &ServerConfig,
        adapter: AdapterConfig,
        registry: &StoreRegistry,
    ) -> Result<Self> {
        let store = Arc::new(MemoryStore::with_capacity(server.max_entries));
        let cache = registry.bind(store, adapter)?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<Json<WriteResponse>> {
    let Json(req) = payload?;
    state
        .cache
        .set(&req.key, req.value, req.ttl, req.auto_insert)?;

    Ok(Json(WriteResponse::new(req.key, "set")))
}

/// Handler for POST /add
pub async fn add_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AddRequest>, JsonRejection>,
) -> Result<Json<WriteResponse>> {
    let Json(req) = payload?;
    state.cache.add(&req.key, req.value, req.ttl, req.overwrite)?;

    Ok(Json(WriteResponse::new(req.key, "added")))
}

/// Handler for GET /get/:key
///
/// Responds 404 when the key is not stored.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key)? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for POST /get-multi
pub async fn get_multi_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GetMultiRequest>, JsonRejection>,
) -> Result<Json<GetMultiResponse>> {
    let Json(req) = payload?;
    let entries = state.cache.get_multi_or(&req.keys, req.default)?;

    Ok(Json(GetMultiResponse { entries }))
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HasResponse>> {
    let exists = state.cache.has(&key)?;

    Ok(Json(HasResponse { key, exists }))
}

/// Handler for DELETE /del/:key
///
/// Deleting an absent key succeeds.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<WriteResponse>> {
    state.cache.delete(&key)?;

    Ok(Json(WriteResponse::new(key, "deleted")))
}

/// Handler for POST /del-multi
pub async fn delete_multi_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DeleteMultiRequest>, JsonRejection>,
) -> Result<Json<DeleteMultiResponse>> {
    let Json(req) = payload?;
    state.cache.delete_multi(&req.keys)?;

    Ok(Json(DeleteMultiResponse {
        deleted: req.keys.len(),
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.store().stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
