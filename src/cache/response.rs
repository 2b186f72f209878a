//! Response Cache Module
//!
//! Rendered HTTP responses kept in-process with their own TTL, independent
//! of the data-level snapshot in the cache store. The number of stored
//! responses is bounded; the least recently used one is evicted first.

use std::num::NonZeroUsize;
use std::sync::Arc;

use axum::body::Bytes;
use lru::LruCache;
use tokio::sync::RwLock;

use crate::cache::CacheEntry;

/// A response captured for replay.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

#[derive(Debug)]
struct Slots {
    entries: LruCache<String, CacheEntry<CachedResponse>>,
    /// Bumped by every purge
    generation: u64,
}

/// Shared response cache keyed by request identity (`METHOD path?query`).
#[derive(Debug, Clone)]
pub struct ResponseCache {
    slots: Arc<RwLock<Slots>>,
    ttl: u64,
}

impl ResponseCache {
    /// Creates an empty cache holding at most `max_entries` responses, each
    /// living for `ttl` seconds.
    pub fn new(ttl: u64, max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            slots: Arc::new(RwLock::new(Slots {
                entries: LruCache::new(capacity),
                generation: 0,
            })),
            ttl,
        }
    }

    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    /// Current purge generation. Pass it back to [`insert`](Self::insert)
    /// once the response has been rendered.
    pub async fn generation(&self) -> u64 {
        self.slots.read().await.generation
    }

    /// Returns the live response stored for `key` and its remaining TTL.
    pub async fn get(&self, key: &str) -> Option<(CachedResponse, u64)> {
        let mut slots = self.slots.write().await;
        let expired = slots.entries.peek(key)?.is_expired();
        if expired {
            slots.entries.pop(key);
            return None;
        }

        slots
            .entries
            .get(key)
            .map(|entry| (entry.value.clone(), entry.ttl_remaining().unwrap_or(0)))
    }

    /// Stores `response` unless a purge happened since `generation` was read.
    ///
    /// Returns whether the response was stored.
    pub async fn insert(&self, key: String, response: CachedResponse, generation: u64) -> bool {
        let mut slots = self.slots.write().await;
        if slots.generation != generation {
            return false;
        }
        slots
            .entries
            .push(key, CacheEntry::new(response, Some(self.ttl)));
        true
    }

    /// Drops every stored response, returning how many were removed.
    pub async fn purge(&self) -> usize {
        let mut slots = self.slots.write().await;
        slots.generation += 1;
        let count = slots.entries.len();
        slots.entries.clear();
        count
    }

    /// Removes expired responses, returning how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut slots = self.slots.write().await;
        let expired: Vec<String> = slots
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            slots.entries.pop(key);
        }
        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.entries.len()
    }
}
