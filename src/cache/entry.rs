//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A stored value with its expiration deadline.
///
/// Shared by the in-memory cache store (`V = String`) and the response
/// cache (`V = CachedResponse`).
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL in seconds.
    pub fn new(value: V, ttl_seconds: Option<u64>) -> Self {
        let now = current_timestamp_ms();
        let expires_at = ttl_seconds.map(|ttl| now.saturating_add(ttl.saturating_mul(1000)));

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the expiration
    /// time, so a fully elapsed TTL never reads as valid.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against a caller-supplied clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        matches!(self.expires_at, Some(expires) if now_ms >= expires)
    }

    // == Time To Live ==
    /// Returns remaining TTL in seconds, or None if no expiration is set.
    ///
    /// Used for the `cache-control` header of replayed responses.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()) / 1000)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
