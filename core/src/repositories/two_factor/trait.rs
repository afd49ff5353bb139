//! Storage interfaces for the two-factor secret lifecycle.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::two_factor::TwoFactorSetup;
use crate::errors::CoreError;

/// Short-TTL cache of generated-but-unconfirmed TOTP secrets.
///
/// An entry exists only during the open setup window; it is deleted when the
/// user confirms possession (one-time use) or silently expires.
#[async_trait]
pub trait PendingSecretStore: Send + Sync {
    /// Cache a pending setup for the user with the given TTL.
    async fn put(
        &self,
        user_id: &str,
        setup: &TwoFactorSetup,
        ttl: Duration,
    ) -> Result<(), CoreError>;

    /// Fetch the pending setup, if the window is still open.
    async fn get(&self, user_id: &str) -> Result<Option<TwoFactorSetup>, CoreError>;

    /// Drop the pending setup.
    async fn remove(&self, user_id: &str) -> Result<(), CoreError>;
}

/// Committed two-factor secrets on the user record.
///
/// A user with a committed secret has the second factor enabled; clearing the
/// secret disables it.
#[async_trait]
pub trait TwoFactorRepository: Send + Sync {
    /// The committed secret, if the user has the second factor enabled.
    async fn committed_secret(&self, user_id: &str) -> Result<Option<String>, CoreError>;

    /// Persist the secret on the user record, enabling the second factor.
    async fn commit(&self, user_id: &str, secret: &str) -> Result<(), CoreError>;

    /// Remove the committed secret, disabling the second factor.
    async fn clear(&self, user_id: &str) -> Result<(), CoreError>;
}
