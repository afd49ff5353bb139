//! Redis-backed pending two-factor secret store.
//!
//! Entries live under `2fa:setup:<user_id>` for the duration of the setup
//! window and are deleted on confirmation.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use kg_core::domain::entities::two_factor::TwoFactorSetup;
use kg_core::errors::CoreError;
use kg_core::repositories::two_factor::PendingSecretStore;

use super::redis_client::RedisClient;

/// Redis key prefix for pending setup entries
const PENDING_KEY_PREFIX: &str = "2fa:setup";

/// Production pending-secret store over Redis.
pub struct RedisPendingSecretStore {
    client: RedisClient,
}

impl RedisPendingSecretStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Format the storage key for a user id.
    fn pending_key(user_id: &str) -> String {
        format!("{PENDING_KEY_PREFIX}:{user_id}")
    }
}

#[async_trait]
impl PendingSecretStore for RedisPendingSecretStore {
    async fn put(
        &self,
        user_id: &str,
        setup: &TwoFactorSetup,
        ttl: Duration,
    ) -> Result<(), CoreError> {
        let payload = serde_json::to_string(setup)
            .map_err(|e| CoreError::infrastructure(format!("failed to encode setup: {e}")))?;

        self.client
            .set_with_expiry(&Self::pending_key(user_id), &payload, ttl)
            .await?;

        debug!(user_id = %user_id, "pending two-factor secret cached");
        Ok(())
    }

    async fn get(&self, user_id: &str) -> Result<Option<TwoFactorSetup>, CoreError> {
        let raw = self.client.get(&Self::pending_key(user_id)).await?;
        raw.map(|r| {
            serde_json::from_str(&r)
                .map_err(|e| CoreError::infrastructure(format!("failed to decode setup: {e}")))
        })
        .transpose()
    }

    async fn remove(&self, user_id: &str) -> Result<(), CoreError> {
        self.client.delete(&Self::pending_key(user_id)).await?;
        Ok(())
    }
}
