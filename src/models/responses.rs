//! Response DTOs for the property listings API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use serde::Serialize;

use super::Property;

/// One listing as rendered by the API: price as decimal text,
/// `created_at` as ISO-8601.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    pub created_at: String,
}

impl From<&Property> for PropertyView {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id,
            title: property.title.clone(),
            description: property.description.clone(),
            price: property.price.to_string(),
            location: property.location.clone(),
            created_at: format_timestamp(&property.created_at),
        }
    }
}

/// ISO-8601 with a `+00:00` offset; the fraction is omitted when there are
/// no microseconds, otherwise it has six digits.
fn format_timestamp(at: &DateTime<Utc>) -> String {
    let format = if at.nanosecond() / 1_000 == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    at.to_rfc3339_opts(format, false)
}

/// Response body for `GET /properties/`
#[derive(Debug, Clone, Serialize)]
pub struct PropertyListResponse {
    pub properties: Vec<PropertyView>,
    pub count: usize,
    pub message: String,
}

impl PropertyListResponse {
    pub fn new(properties: &[Property]) -> Self {
        let properties: Vec<PropertyView> = properties.iter().map(PropertyView::from).collect();
        Self {
            count: properties.len(),
            properties,
            message: "Properties retrieved successfully".to_string(),
        }
    }
}

/// Response body for the administrative write endpoints
#[derive(Debug, Clone, Serialize)]
pub struct PropertyResponse {
    pub property: PropertyView,
    pub message: String,
}

impl PropertyResponse {
    pub fn new(property: &Property, message: impl Into<String>) -> Self {
        Self {
            property: PropertyView::from(property),
            message: message.into(),
        }
    }
}

/// Response body for `DELETE /admin/properties/:id`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: i64,
}

impl DeleteResponse {
    pub fn new(id: i64) -> Self {
        Self {
            message: format!("Property {} deleted successfully", id),
            id,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
