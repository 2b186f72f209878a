//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_metrics_handler, create_property_handler, delete_property_handler, health_handler,
    list_properties_handler, update_property_handler, AppState,
};
use super::response_cache::response_cache_layer;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /properties/` - All listings (response-cached)
/// - `GET /properties/metrics/` - Cache store hit/miss metrics
/// - `POST /admin/properties` - Create a listing
/// - `PUT /admin/properties/:id` - Update a listing
/// - `DELETE /admin/properties/:id` - Delete a listing
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let cached = Router::<AppState>::new()
        .route("/properties/", get(list_properties_handler))
        .route_layer(middleware::from_fn_with_state(
            state.responses.clone(),
            response_cache_layer,
        ));

    Router::new()
        .merge(cached)
        .route("/properties/metrics/", get(cache_metrics_handler))
        .route("/admin/properties", post(create_property_handler))
        .route(
            "/admin/properties/:id",
            put(update_property_handler).delete(delete_property_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
