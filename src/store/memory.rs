//! In-memory property repository.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::PropertyRepository;
use crate::error::Result;
use crate::models::{NewProperty, Property, PropertyUpdate};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Property>,
    last_id: i64,
}

/// Property table held in process memory; ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    table: RwLock<Table>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyRepository for MemoryRepository {
    async fn list_all(&self) -> Result<Vec<Property>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Property>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|p| p.title == title)
            .cloned())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.read().await.rows.len())
    }

    async fn create(&self, new: NewProperty) -> Result<Property> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let property = Property {
            id: table.last_id,
            title: new.title,
            description: new.description,
            price: new.price,
            location: new.location,
            created_at: Utc::now(),
        };
        table.rows.insert(property.id, property.clone());
        Ok(property)
    }

    async fn update(&self, id: i64, update: PropertyUpdate) -> Result<Option<Property>> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|property| {
            update.apply_to(property);
            property.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Property>> {
        Ok(self.table.write().await.rows.remove(&id))
    }
}
