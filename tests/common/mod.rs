//! Test doubles shared by the integration tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use property_cache::{
    error::Result,
    models::{NewProperty, Property, PropertyUpdate},
    store::{MemoryRepository, PropertyRepository},
};
use tokio::sync::Notify;

/// Repository whose first `list_all` parks until released.
#[derive(Default)]
pub struct PausedListRepository {
    inner: MemoryRepository,
    armed: AtomicBool,
    /// Signalled once the rows have been read
    pub loading: Notify,
    pub release: Notify,
}

impl PausedListRepository {
    pub fn armed() -> Self {
        let repo = Self::default();
        repo.armed.store(true, Ordering::SeqCst);
        repo
    }
}

#[async_trait]
impl PropertyRepository for PausedListRepository {
    async fn list_all(&self) -> Result<Vec<Property>> {
        let rows = self.inner.list_all().await?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.loading.notify_one();
            self.release.notified().await;
        }
        Ok(rows)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Property>> {
        self.inner.find_by_title(title).await
    }

    async fn count(&self) -> Result<usize> {
        self.inner.count().await
    }

    async fn create(&self, new: NewProperty) -> Result<Property> {
        self.inner.create(new).await
    }

    async fn update(&self, id: i64, update: PropertyUpdate) -> Result<Option<Property>> {
        self.inner.update(id, update).await
    }

    async fn delete(&self, id: i64) -> Result<Option<Property>> {
        self.inner.delete(id).await
    }
}
