//! Error types for the property listings service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// == Cache Error Enum ==
/// Failures raised by a cache store backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The cache store could not be reached
    #[error("Cache store unavailable: {0}")]
    Unavailable(String),

    /// Command failure reported by Redis
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Key or value rejected by the store
    #[error("Invalid cache entry: {0}")]
    InvalidEntry(String),

    /// Cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == App Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug)]
pub enum AppError {
    /// No property with the given id
    #[error("Property not found: {0}")]
    NotFound(i64),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Data store fault
    #[error("Data store error: {0}")]
    DataStore(String),

    /// Cache store fault outside the metrics path
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::DataStore(_) | AppError::Cache(_) | AppError::Internal(_) => {
                error!(error = %self, "request failed on a backing store");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, AppError>;
