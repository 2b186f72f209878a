//! Cache Module
//!
//! Cache store backends (in-memory and Redis), key naming, and the
//! in-process response cache.

mod backend;
mod entry;
mod keys;
mod lru;
mod redis_backend;
mod response;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use backend::{format_memory_human, BackendInfo, CacheBackend, MemoryBackend};
pub use entry::CacheEntry;
pub use keys::{CacheKey, ALL_PROPERTIES};
pub use lru::LruTracker;
pub use redis_backend::RedisBackend;
pub use response::{CachedResponse, ResponseCache};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes, the same as Redis' bulk string limit
pub const MAX_VALUE_SIZE: usize = 512 * 1024 * 1024; // 512 MiB

/// Larger response bodies are served but never stored in the response cache
pub const MAX_CACHED_BODY_SIZE: usize = 8 * 1024 * 1024; // 8 MiB
