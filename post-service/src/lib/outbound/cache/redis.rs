use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use redis::Client;

use crate::domain::post::errors::CacheError;
use crate::domain::post::ports::CacheStore;

/// Redis-backed read cache.
pub struct RedisCacheStore {
    manager: ConnectionManager,
}

impl RedisCacheStore {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Connect to Redis and build a managed connection.
    ///
    /// # Errors
    /// * `Backend` - URL is invalid or the server is unreachable
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = Client::open(url).map_err(|e| CacheError::Backend(e.to_string()))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        Ok(Self::new(manager))
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager.clone();
        conn.get(key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let _: () = conn
            .set_ex(key, value, ttl_seconds)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let _: () = conn
            .del(key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();

        // KEYS is acceptable here: the keyspace only holds this service's
        // cache entries and invalidation is rare next to reads.
        let keys: Vec<String> = conn
            .keys(format!("{}*", prefix))
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        if keys.is_empty() {
            return Ok(());
        }

        let _: () = conn
            .del(keys)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))?;

        Ok(())
    }
}
