//! Token revocation store
//!
//! Logged-out tokens are remembered by their `jti` until they would have
//! expired anyway, so the list never outgrows the set of live tokens.

use async_trait::async_trait;
use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Remember `jti` as revoked for `ttl_seconds`
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> AppResult<()>;

    async fn is_revoked(&self, jti: &str) -> AppResult<bool>;
}

fn key(jti: &str) -> String {
    format!("revoked:{}", jti)
}

/// Redis-backed store: one `revoked:{jti}` key per token, expiring with it
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: Client,
}

impl RedisRevocationStore {
    /// Open the client and check the server answers
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, jti: &str, ttl_seconds: u64) -> AppResult<()> {
        // An expired token needs no entry; SETEX rejects a zero TTL
        if ttl_seconds == 0 {
            return Ok(());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(key(jti), "1", ttl_seconds).await?;
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> AppResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let exists: bool = conn.exists(key(jti)).await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::key;

    #[test]
    fn keys_are_namespaced_by_jti() {
        assert_eq!(key("5f1c"), "revoked:5f1c");
    }
}
