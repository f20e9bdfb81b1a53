//! Redis implementation of the byte store.
//!
//! Uses a connection manager so transient disconnects are re-established
//! without surfacing to request handling; individual operation failures
//! still map to [`StoreError`] and are handled by cache policy (miss on
//! get, ignore on put).

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::store::{BinaryStore, StoreError, StoreResult};

/// Byte store backed by a Redis deployment.
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    /// Connect to the Redis instance at `url` (`redis://host:port/db`).
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Configuration(format!("invalid redis URL: {}", e)))?;
        let connection = client
            .get_connection_manager()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl BinaryStore for RedisStore {
    async fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let mut con = self.connection.clone();
        con.get(key)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        let mut con = self.connection.clone();
        con.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn flush_all(&self) -> StoreResult<()> {
        let mut con = self.connection.clone();
        redis::cmd("FLUSHDB")
            .query_async::<()>(&mut con)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn health_check(&self) -> StoreResult<bool> {
        let mut con = self.connection.clone();
        let pong: String = redis::cmd("PING")
            .query_async(&mut con)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(pong == "PONG")
    }
}
