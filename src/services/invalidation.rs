//! Post-commit cache invalidation.

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheBackend, CacheKey, ResponseCache};
use crate::error::CacheError;
use crate::models::Property;

/// A committed change to the property collection.
#[derive(Debug, Clone, Copy)]
pub enum Mutation<'a> {
    Created(&'a Property),
    Updated(&'a Property),
    Deleted(&'a Property),
}

impl Mutation<'_> {
    pub fn property(&self) -> &Property {
        match self {
            Mutation::Created(p) | Mutation::Updated(p) | Mutation::Deleted(p) => p,
        }
    }
}

impl fmt::Display for Mutation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Created(_) => f.write_str("created"),
            Mutation::Updated(_) => f.write_str("updated"),
            Mutation::Deleted(_) => f.write_str("deleted"),
        }
    }
}

/// Drops every cached view of the property collection after a write.
///
/// The snapshot key is deleted from the cache store and, when attached,
/// all rendered responses are purged so a write is visible on the next read
/// of either layer. There is no retry: a failed delete is returned to the
/// writer and the stale snapshot lives until its TTL.
///
/// Every invalidation bumps a generation counter. Readers that loaded the
/// collection before a write store it through [`fill`](Self::fill), which
/// refuses snapshots taken under an older generation.
#[derive(Clone)]
pub struct InvalidationHook {
    backend: Arc<dyn CacheBackend>,
    key: CacheKey,
    responses: Option<ResponseCache>,
    generation: Arc<RwLock<u64>>,
}

impl InvalidationHook {
    pub fn new(backend: Arc<dyn CacheBackend>, key: CacheKey) -> Self {
        Self {
            backend,
            key,
            responses: None,
            generation: Arc::new(RwLock::new(0)),
        }
    }

    /// Also purge `responses` on every write.
    pub fn with_response_cache(mut self, responses: ResponseCache) -> Self {
        self.responses = Some(responses);
        self
    }

    pub async fn after_commit(&self, mutation: Mutation<'_>) -> Result<(), CacheError> {
        info!(
            property = %mutation.property().title,
            action = %mutation,
            key = %self.key,
            "property changed - invalidating cache"
        );

        {
            let mut generation = self.generation.write().await;
            *generation += 1;
            self.backend.delete(self.key.as_str()).await?;
        }

        if let Some(responses) = &self.responses {
            let purged = responses.purge().await;
            if purged > 0 {
                info!(purged, "purged cached property responses");
            }
        }
        Ok(())
    }

    /// Generation to hand back to [`fill`](Self::fill) after loading.
    pub async fn generation(&self) -> u64 {
        *self.generation.read().await
    }

    /// Stores `payload` under the snapshot key unless a write was committed
    /// since `observed` was read. Returns whether the snapshot was stored.
    pub async fn fill(
        &self,
        observed: u64,
        payload: String,
        ttl: u64,
    ) -> Result<bool, CacheError> {
        let generation = self.generation.read().await;
        if *generation != observed {
            debug!(key = %self.key, "collection changed during load, snapshot not stored");
            return Ok(false);
        }
        self.backend.set(self.key.as_str(), payload, ttl).await?;
        Ok(true)
    }
}
