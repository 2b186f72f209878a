//! API Handlers
//!
//! HTTP request handlers for the property listings endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::{CacheBackend, CacheKey, ResponseCache};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    CreatePropertyRequest, DeleteResponse, HealthResponse, PropertyListResponse,
    PropertyResponse, UpdatePropertyRequest,
};
use crate::services::{get_cache_metrics, CacheMetrics, InvalidationHook, PropertyService};
use crate::store::PropertyRepository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-through access and invalidating writes
    pub properties: PropertyService,
    /// Rendered property-list responses
    pub responses: ResponseCache,
}

impl AppState {
    /// Wires the service, its invalidation hook and the response cache.
    ///
    /// Writes purge both the data snapshot and cached responses.
    pub fn new(
        repo: Arc<dyn PropertyRepository>,
        cache: Arc<dyn CacheBackend>,
        config: &Config,
    ) -> Self {
        let key = CacheKey::all_properties(config.cache_key_prefix.as_deref());
        let responses =
            ResponseCache::new(config.response_cache_ttl, config.response_cache_max_entries);
        let hook =
            InvalidationHook::new(cache.clone(), key.clone()).with_response_cache(responses.clone());
        let properties =
            PropertyService::new(repo, cache, key, config.data_cache_ttl).with_hook(hook);

        Self {
            properties,
            responses,
        }
    }
}

/// Handler for GET /properties/
pub async fn list_properties_handler(
    State(state): State<AppState>,
) -> Result<Json<PropertyListResponse>> {
    let properties = state.properties.get_all_properties().await?;
    Ok(Json(PropertyListResponse::new(&properties)))
}

/// Handler for GET /properties/metrics/
///
/// Always 200; failures are reported in the body's `status`.
pub async fn cache_metrics_handler(State(state): State<AppState>) -> Json<CacheMetrics> {
    let backend = state.properties.backend();
    Json(get_cache_metrics(backend.as_ref()).await)
}

/// Handler for POST /admin/properties
pub async fn create_property_handler(
    State(state): State<AppState>,
    Json(req): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<PropertyResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let property = state.properties.create(req.into_new_property()).await?;
    Ok((
        StatusCode::CREATED,
        Json(PropertyResponse::new(&property, "Property created successfully")),
    ))
}

/// Handler for PUT /admin/properties/:id
pub async fn update_property_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePropertyRequest>,
) -> Result<Json<PropertyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let property = state.properties.update(id, req.into_update()).await?;
    Ok(Json(PropertyResponse::new(
        &property,
        "Property updated successfully",
    )))
}

/// Handler for DELETE /admin/properties/:id
pub async fn delete_property_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    let property = state.properties.delete(id).await?;
    Ok(Json(DeleteResponse::new(property.id)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
