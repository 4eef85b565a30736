//! API Handlers
//!
//! HTTP request handlers mapping admin requests onto the cache manager.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::cache::{CacheKey, CacheManager, ManagerStats};
use crate::error::{CacheError, Result};
use crate::models::requests::validate_segment;
use crate::models::{
    EvictQuery, EvictResponse, Fragment, FragmentResponse, GetQuery, HealthResponse, PutRequest,
    PutResponse,
};

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Fragment cache; initializes its store on first request
    pub cache: Arc<CacheManager<Fragment>>,
}

impl AppState {
    /// Creates a new AppState around the given manager.
    pub fn new(cache: Arc<CacheManager<Fragment>>) -> Self {
        Self { cache }
    }

    /// AppState bound to the process-wide fragment cache.
    pub fn global() -> Self {
        Self::new(CacheManager::global())
    }
}

type FragmentPath = Path<(String, String, String)>;

fn validate_identity(name: &str, mode: &str, locale: &str) -> Result<()> {
    let error = validate_segment("name", name)
        .or_else(|| validate_segment("mode", mode))
        .or_else(|| validate_segment("locale", locale));
    match error {
        Some(msg) => Err(CacheError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

/// Handler for GET /fragments/:name/:mode/:locale
///
/// `?ttl=N` treats fragments at least N seconds old as missing.
pub async fn get_fragment_handler(
    State(state): State<AppState>,
    Path((name, mode, locale)): FragmentPath,
    Query(query): Query<GetQuery>,
) -> Result<Json<FragmentResponse>> {
    validate_identity(&name, &mode, &locale)?;

    let ttl = query.ttl.unwrap_or(0);
    match state.cache.get(&name, &mode, &locale, ttl)? {
        Some(fragment) => Ok(Json(FragmentResponse::new(name, mode, locale, fragment))),
        None => Err(CacheError::NotFound(
            CacheKey::compose(&name, &mode, &locale).to_string(),
        )),
    }
}

/// Handler for PUT /fragments/:name/:mode/:locale
pub async fn put_fragment_handler(
    State(state): State<AppState>,
    Path((name, mode, locale)): FragmentPath,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    validate_identity(&name, &mode, &locale)?;

    state
        .cache
        .put(&name, &mode, &locale, Fragment::new(req.nodes))?;

    Ok(Json(PutResponse::new(&name, &mode, &locale)))
}

/// Handler for DELETE /fragments/:name/:mode/:locale
///
/// Succeeds whether or not the fragment was cached.
pub async fn evict_fragment_handler(
    State(state): State<AppState>,
    Path((name, mode, locale)): FragmentPath,
) -> Result<Json<EvictResponse>> {
    validate_identity(&name, &mode, &locale)?;

    state.cache.evict(&name, &mode, &locale)?;

    Ok(Json(EvictResponse::exact(&name, &mode, &locale)))
}

/// Handler for DELETE /fragments?prefix=P or ?name=N
pub async fn evict_fragments_handler(
    State(state): State<AppState>,
    Query(query): Query<EvictQuery>,
) -> Result<Json<EvictResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let response = if let Some(prefix) = query.prefix {
        let removed = state.cache.evict_by_starts_with(&prefix)?;
        EvictResponse::bulk(&prefix, removed)
    } else {
        let name = query.name.unwrap_or_default();
        let removed = state.cache.evict_by_name(&name)?;
        EvictResponse::bulk(&name, removed)
    };

    info!("{}", response.message);
    Ok(Json(response))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<ManagerStats>> {
    Ok(Json(state.cache.stats()?))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.is_initialized()))
}
