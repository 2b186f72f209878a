//! API Module
//!
//! HTTP handlers, routing and response caching for the listings REST API.
//!
//! # Endpoints
//! - `GET /properties/` - All listings, served through the response cache
//! - `GET /properties/metrics/` - Cache store hit/miss metrics
//! - `POST /admin/properties`, `PUT|DELETE /admin/properties/:id` - Writes
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod response_cache;
pub mod routes;

pub use handlers::*;
pub use response_cache::{response_cache_layer, X_CACHE};
pub use routes::create_router;
