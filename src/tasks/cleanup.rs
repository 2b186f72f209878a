//! TTL Cleanup Task
//!
//! Background task that periodically removes expired entries from the
//! in-memory cache store and the response cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStore, ResponseCache};

/// Spawns the periodic sweep.
///
/// `store` is None when the cache store is Redis, which expires keys itself.
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    store: Option<Arc<RwLock<CacheStore>>>,
    responses: ResponseCache,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let store_removed = match &store {
                Some(store) => store.write().await.cleanup_expired(),
                None => 0,
            };
            let responses_removed = responses.cleanup_expired().await;

            if store_removed + responses_removed > 0 {
                info!(
                    store_removed,
                    responses_removed, "TTL cleanup: removed expired entries"
                );
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachedResponse;
    use axum::body::Bytes;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let store = Arc::new(RwLock::new(CacheStore::new(100)));
        let responses = ResponseCache::new(1, 10);

        store
            .write()
            .await
            .set("all_properties", "[]".to_string(), Some(1))
            .unwrap();
        responses
            .insert(
                "GET /properties/".to_string(),
                CachedResponse {
                    status: 200,
                    headers: Vec::new(),
                    body: Bytes::new(),
                },
                0,
            )
            .await;

        let handle = spawn_cleanup_task(Some(store.clone()), responses.clone(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert!(store.read().await.is_empty(), "Expired entry should have been cleaned up");
        assert_eq!(responses.len().await, 0);
        assert_eq!(store.read().await.stats().expired_keys, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let store = Arc::new(RwLock::new(CacheStore::new(100)));
        store
            .write()
            .await
            .set("all_properties", "[]".to_string(), Some(3600))
            .unwrap();

        let handle = spawn_cleanup_task(Some(store.clone()), ResponseCache::new(900, 10), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(
            store.write().await.get("all_properties").as_deref(),
            Some("[]")
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(None, ResponseCache::new(900, 10), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
