//! In-memory implementations of the two-factor stores.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::entities::two_factor::TwoFactorSetup;
use crate::errors::CoreError;

use super::r#trait::{PendingSecretStore, TwoFactorRepository};

/// In-memory pending secret store honoring TTLs.
#[derive(Clone, Default)]
pub struct MemoryPendingSecretStore {
    entries: Arc<RwLock<HashMap<String, (TwoFactorSetup, Instant)>>>,
}

impl MemoryPendingSecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PendingSecretStore for MemoryPendingSecretStore {
    async fn put(
        &self,
        user_id: &str,
        setup: &TwoFactorSetup,
        ttl: Duration,
    ) -> Result<(), CoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(user_id.to_string(), (setup.clone(), Instant::now() + ttl));
        Ok(())
    }

    async fn get(&self, user_id: &str) -> Result<Option<TwoFactorSetup>, CoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(user_id)
            .filter(|(_, deadline)| Instant::now() < *deadline)
            .map(|(setup, _)| setup.clone()))
    }

    async fn remove(&self, user_id: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.write().await;
        entries.remove(user_id);
        Ok(())
    }
}

/// In-memory committed-secret repository.
#[derive(Clone, Default)]
pub struct MemoryTwoFactorRepository {
    secrets: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryTwoFactorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TwoFactorRepository for MemoryTwoFactorRepository {
    async fn committed_secret(&self, user_id: &str) -> Result<Option<String>, CoreError> {
        let secrets = self.secrets.read().await;
        Ok(secrets.get(user_id).cloned())
    }

    async fn commit(&self, user_id: &str, secret: &str) -> Result<(), CoreError> {
        let mut secrets = self.secrets.write().await;
        secrets.insert(user_id.to_string(), secret.to_string());
        Ok(())
    }

    async fn clear(&self, user_id: &str) -> Result<(), CoreError> {
        let mut secrets = self.secrets.write().await;
        secrets.remove(user_id);
        Ok(())
    }
}
