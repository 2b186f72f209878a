//! Redis-backed cache store.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{Client, Cmd, FromRedisValue, InfoDict, RedisError};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::{BackendInfo, CacheBackend};
use crate::error::CacheError;

/// Cache store living in a Redis server.
///
/// The multiplexed connection is opened on first use and shared by all
/// callers; a dropped connection is discarded so the next call reconnects.
pub struct RedisBackend {
    client: Client,
    connection: Mutex<Option<MultiplexedConnection>>,
}

impl RedisBackend {
    /// Validates `url` without connecting.
    pub fn new(url: &str) -> Result<Self, CacheError> {
        let client = Client::open(url)?;
        Ok(Self {
            client,
            connection: Mutex::new(None),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        let mut slot = self.connection.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        debug!("opened redis connection");
        *slot = Some(conn.clone());
        Ok(conn)
    }

    async fn query<T: FromRedisValue + Send>(&self, cmd: &Cmd) -> Result<T, CacheError> {
        let mut conn = self.connection().await?;
        match cmd.query_async(&mut conn).await {
            Ok(value) => Ok(value),
            Err(err) => {
                if is_connection_fault(&err) {
                    warn!(error = %err, "redis connection lost, will reconnect");
                    self.connection.lock().await.take();
                }
                Err(err.into())
            }
        }
    }
}

fn is_connection_fault(err: &RedisError) -> bool {
    err.is_io_error() || err.is_connection_dropped()
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.query(redis::cmd("GET").arg(key)).await
    }

    async fn set(&self, key: &str, value: String, ttl_secs: u64) -> Result<(), CacheError> {
        self.query(redis::cmd("SET").arg(key).arg(value).arg("EX").arg(ttl_secs.max(1)))
            .await
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let removed: u64 = self.query(redis::cmd("DEL").arg(key)).await?;
        Ok(removed > 0)
    }

    async fn info(&self) -> Result<BackendInfo, CacheError> {
        let info: InfoDict = self.query(&redis::cmd("INFO")).await?;
        let keys: u64 = self.query(&redis::cmd("DBSIZE")).await?;

        Ok(BackendInfo {
            keyspace_hits: info.get("keyspace_hits").unwrap_or(0),
            keyspace_misses: info.get("keyspace_misses").unwrap_or(0),
            keys,
            used_memory_human: info
                .get("used_memory_human")
                .unwrap_or_else(|| "N/A".to_string()),
        })
    }
}
