//! Property access with read-through caching.
//!
//! Every write goes through [`PropertyService`], which fires the
//! invalidation hook before returning to its caller.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::{CacheBackend, CacheKey};
use crate::error::{AppError, CacheError, Result};
use crate::models::{NewProperty, Property, PropertyUpdate};
use crate::services::{InvalidationHook, Mutation};
use crate::store::PropertyRepository;

#[derive(Clone)]
pub struct PropertyService {
    repo: Arc<dyn PropertyRepository>,
    cache: Arc<dyn CacheBackend>,
    key: CacheKey,
    ttl: u64,
    hook: InvalidationHook,
}

impl PropertyService {
    /// Builds a service caching the collection under `key` for `ttl` seconds.
    ///
    /// The invalidation hook defaults to deleting `key` only; attach a
    /// response cache through [`with_hook`](Self::with_hook).
    pub fn new(
        repo: Arc<dyn PropertyRepository>,
        cache: Arc<dyn CacheBackend>,
        key: CacheKey,
        ttl: u64,
    ) -> Self {
        let hook = InvalidationHook::new(cache.clone(), key.clone());
        Self {
            repo,
            cache,
            key,
            ttl,
            hook,
        }
    }

    pub fn with_hook(mut self, hook: InvalidationHook) -> Self {
        self.hook = hook;
        self
    }

    pub fn backend(&self) -> Arc<dyn CacheBackend> {
        self.cache.clone()
    }

    // == Read-through ==
    /// Returns the whole collection, from the cache store when present.
    ///
    /// On a miss the collection is loaded from the repository and stored for
    /// the configured TTL, unless a write committed while it was loading.
    /// Store faults propagate; there is no fallback.
    pub async fn get_all_properties(&self) -> Result<Vec<Property>> {
        if let Some(cached) = self.cache.get(self.key.as_str()).await? {
            info!(key = %self.key, "Cache HIT: retrieved properties from cache");
            return serde_json::from_str(&cached)
                .map_err(|e| AppError::Cache(CacheError::Serialization(e)));
        }

        info!(key = %self.key, "Cache MISS: fetching properties from data store");
        let generation = self.hook.generation().await;
        let properties = self.repo.list_all().await?;

        let payload = serde_json::to_string(&properties).map_err(CacheError::from)?;
        if self.hook.fill(generation, payload, self.ttl).await? {
            debug!(key = %self.key, ttl = self.ttl, count = properties.len(), "stored properties in cache");
        }

        Ok(properties)
    }

    pub async fn count(&self) -> Result<usize> {
        self.repo.count().await
    }

    // == Writes ==
    pub async fn create(&self, new: NewProperty) -> Result<Property> {
        let property = self.repo.create(new).await?;
        self.hook.after_commit(Mutation::Created(&property)).await?;
        Ok(property)
    }

    pub async fn update(&self, id: i64, update: PropertyUpdate) -> Result<Property> {
        let property = self
            .repo
            .update(id, update)
            .await?
            .ok_or(AppError::NotFound(id))?;
        self.hook.after_commit(Mutation::Updated(&property)).await?;
        Ok(property)
    }

    pub async fn delete(&self, id: i64) -> Result<Property> {
        let property = self.repo.delete(id).await?.ok_or(AppError::NotFound(id))?;
        self.hook.after_commit(Mutation::Deleted(&property)).await?;
        Ok(property)
    }

    /// Returns the record titled like `new`, creating it when missing.
    /// The flag is true when a record was created.
    pub async fn get_or_create_by_title(&self, new: NewProperty) -> Result<(Property, bool)> {
        if let Some(existing) = self.repo.find_by_title(&new.title).await? {
            return Ok((existing, false));
        }
        Ok((self.create(new).await?, true))
    }
}
