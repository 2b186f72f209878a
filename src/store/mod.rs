//! Data Store Module
//!
//! Persistence seam for property records.

mod memory;

pub use memory::MemoryRepository;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewProperty, Property, PropertyUpdate};

/// Persistent storage of property records.
///
/// Implementations only store data; cache invalidation is the caller's
/// post-commit duty (see [`PropertyService`](crate::services::PropertyService)).
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Every record, ordered by id.
    async fn list_all(&self) -> Result<Vec<Property>>;

    async fn find_by_title(&self, title: &str) -> Result<Option<Property>>;

    async fn count(&self) -> Result<usize>;

    /// Inserts a record, assigning its id and creation timestamp.
    async fn create(&self, new: NewProperty) -> Result<Property>;

    /// Applies `update`, returning the stored record or None if absent.
    async fn update(&self, id: i64, update: PropertyUpdate) -> Result<Option<Property>>;

    /// Removes a record, returning it if it existed.
    async fn delete(&self, id: i64) -> Result<Option<Property>>;
}
