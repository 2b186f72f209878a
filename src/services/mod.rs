//! Services Module
//!
//! Read-through access, write invalidation and cache metrics.

mod invalidation;
mod metrics;
mod properties;

pub use invalidation::{InvalidationHook, Mutation};
pub use metrics::{get_cache_metrics, hit_ratio_percentage, CacheMetrics};
pub use properties::PropertyService;
