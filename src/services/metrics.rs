//! Cache hit/miss reporting.

use serde::Serialize;
use tracing::{error, info};

use crate::cache::CacheBackend;

/// Outcome of a metrics query, tagged by `status`.
///
/// Numeric fields only exist on success; callers must check the tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CacheMetrics {
    Success {
        keyspace_hits: u64,
        keyspace_misses: u64,
        total_requests: u64,
        hit_ratio_percentage: f64,
        cache_size: u64,
        memory_usage: String,
    },
    Error {
        error_message: String,
    },
}

impl CacheMetrics {
    pub fn is_success(&self) -> bool {
        matches!(self, CacheMetrics::Success { .. })
    }
}

/// `hits / (hits + misses) * 100` rounded to two decimals, 0 with no traffic.
pub fn hit_ratio_percentage(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        return 0.0;
    }
    let ratio = hits as f64 / total as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}

/// Reads the store's global counters. Never fails: faults become
/// [`CacheMetrics::Error`].
pub async fn get_cache_metrics(backend: &dyn CacheBackend) -> CacheMetrics {
    match backend.info().await {
        Ok(info) => {
            let total_requests = info.keyspace_hits + info.keyspace_misses;
            let hit_ratio = hit_ratio_percentage(info.keyspace_hits, info.keyspace_misses);

            info!(
                "Cache Metrics: Hit Ratio: {:.2}%, Hits: {}, Misses: {}",
                hit_ratio, info.keyspace_hits, info.keyspace_misses
            );

            CacheMetrics::Success {
                keyspace_hits: info.keyspace_hits,
                keyspace_misses: info.keyspace_misses,
                total_requests,
                hit_ratio_percentage: hit_ratio,
                cache_size: info.keys,
                memory_usage: info.used_memory_human,
            }
        }
        Err(err) => {
            error!(error = %err, "Error retrieving cache metrics");
            CacheMetrics::Error {
                error_message: err.to_string(),
            }
        }
    }
}
