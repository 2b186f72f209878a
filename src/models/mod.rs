//! Domain records and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod property;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use property::{NewProperty, ParsePriceError, Price, Property, PropertyUpdate};
pub use requests::{CreatePropertyRequest, UpdatePropertyRequest};
pub use responses::{
    DeleteResponse, HealthResponse, PropertyListResponse, PropertyResponse, PropertyView,
};
