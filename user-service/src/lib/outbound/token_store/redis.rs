use async_trait::async_trait;
use chrono::Duration;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use redis::Client;

use crate::domain::auth::errors::TokenStoreError;
use crate::domain::auth::models::TokenMetadata;
use crate::domain::auth::ports::TokenStore;

/// Redis-backed revocation store.
///
/// Every entry is a single key with a TTL, so many service instances can
/// read and write concurrently without coordination. Keys never outlive the
/// token they describe.
///
/// Key layout:
/// - `access:{token}` / `refresh:{token}` - active metadata (JSON)
/// - `blacklist:{token}` - revocation marker
pub struct RedisTokenStore {
    manager: ConnectionManager,
}

impl RedisTokenStore {
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Connect to Redis and build a managed connection.
    ///
    /// # Errors
    /// * `Backend` - URL is invalid or the server is unreachable
    pub async fn connect(url: &str) -> Result<Self, TokenStoreError> {
        let client = Client::open(url).map_err(|e| TokenStoreError::Backend(e.to_string()))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| TokenStoreError::Backend(e.to_string()))?;

        Ok(Self::new(manager))
    }
}

fn active_key(metadata: &TokenMetadata, token: &str) -> String {
    format!("{}:{}", metadata.token_type, token)
}

fn blacklist_key(token: &str) -> String {
    format!("blacklist:{}", token)
}

fn ttl_seconds(ttl: Duration) -> Option<u64> {
    let seconds = ttl.num_seconds();
    if seconds > 0 {
        Some(seconds as u64)
    } else {
        None
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn record_active(
        &self,
        token: &str,
        metadata: &TokenMetadata,
        ttl: Duration,
    ) -> Result<(), TokenStoreError> {
        let Some(seconds) = ttl_seconds(ttl) else {
            return Ok(());
        };

        let value = serde_json::to_string(metadata)
            .map_err(|e| TokenStoreError::SerializationFailed(e.to_string()))?;

        let mut conn = self.manager.clone();
        let _: () = conn
            .set_ex(active_key(metadata, token), value, seconds)
            .await
            .map_err(|e| TokenStoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn blacklist(&self, token: &str, ttl: Duration) -> Result<(), TokenStoreError> {
        // TTL at or below zero means the token has already expired on its
        // own; a blacklist entry would outlive nothing.
        let Some(seconds) = ttl_seconds(ttl) else {
            return Ok(());
        };

        let mut conn = self.manager.clone();
        let _: () = conn
            .set_ex(blacklist_key(token), "true", seconds)
            .await
            .map_err(|e| TokenStoreError::Backend(e.to_string()))?;

        tracing::info!(ttl_seconds = seconds, "Token blacklisted");

        Ok(())
    }

    async fn is_blacklisted(&self, token: &str) -> Result<bool, TokenStoreError> {
        let mut conn = self.manager.clone();
        let exists: bool = conn
            .exists(blacklist_key(token))
            .await
            .map_err(|e| TokenStoreError::Backend(e.to_string()))?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenType;

    use super::*;

    #[test]
    fn test_key_layout() {
        let metadata = TokenMetadata {
            user_id: 1,
            email: "a@x.com".to_string(),
            token_type: TokenType::Access,
        };
        assert_eq!(active_key(&metadata, "tok"), "access:tok");

        let metadata = TokenMetadata {
            token_type: TokenType::Refresh,
            ..metadata
        };
        assert_eq!(active_key(&metadata, "tok"), "refresh:tok");

        assert_eq!(blacklist_key("tok"), "blacklist:tok");
    }

    #[test]
    fn test_expired_ttl_is_skipped() {
        assert_eq!(ttl_seconds(Duration::seconds(60)), Some(60));
        assert_eq!(ttl_seconds(Duration::zero()), None);
        assert_eq!(ttl_seconds(Duration::seconds(-30)), None);
    }
}
