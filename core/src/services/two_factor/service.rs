//! Two-factor lifecycle service.

use std::time::Duration;

use chrono::Utc;
use tracing::info;

use crate::domain::entities::two_factor::TwoFactorSetup;
use crate::errors::{CoreError, TwoFactorError};
use crate::repositories::two_factor::{PendingSecretStore, TwoFactorRepository};

use super::totp;

/// How long a generated secret stays trustable before the user confirms it
const PENDING_TTL_SECONDS: u64 = 300;

/// Drives the second-factor state machine:
/// `DISABLED -> PENDING_SETUP -> ENABLED -> DISABLED`.
///
/// A generated secret is only trusted once the user proves possession of it
/// by submitting a valid code inside the pending window.
pub struct TwoFactorService<R: TwoFactorRepository, P: PendingSecretStore> {
    records: R,
    pending: P,
    issuer_label: String,
}

impl<R: TwoFactorRepository, P: PendingSecretStore> TwoFactorService<R, P> {
    /// Creates the service; `issuer_label` names this deployment in
    /// authenticator apps.
    pub fn new(records: R, pending: P, issuer_label: impl Into<String>) -> Self {
        Self {
            records,
            pending,
            issuer_label: issuer_label.into(),
        }
    }

    /// Starts (or resumes) setup for a user.
    ///
    /// Retrying inside the open setup window returns the cached secret
    /// unchanged so the user can re-scan the same QR code.
    pub async fn setup(&self, user_id: &str) -> Result<TwoFactorSetup, CoreError> {
        if self.records.committed_secret(user_id).await?.is_some() {
            return Err(TwoFactorError::AlreadyEnabled.into());
        }

        if let Some(cached) = self.pending.get(user_id).await? {
            return Ok(cached);
        }

        let secret = totp::generate_secret();
        let otp_url = totp::provisioning_url(&self.issuer_label, user_id, &secret);
        let setup = TwoFactorSetup::new(secret, otp_url);

        self.pending
            .put(user_id, &setup, Duration::from_secs(PENDING_TTL_SECONDS))
            .await?;

        info!(user_id = %user_id, "two-factor setup started");
        Ok(setup)
    }

    /// Confirms setup with a code from the authenticator app.
    ///
    /// On success the secret moves to the user record and the pending entry
    /// is deleted; the setup window is one-time use.
    pub async fn enable(&self, user_id: &str, code: &str) -> Result<(), CoreError> {
        if self.records.committed_secret(user_id).await?.is_some() {
            return Err(TwoFactorError::AlreadyEnabled.into());
        }

        let setup = self
            .pending
            .get(user_id)
            .await?
            .ok_or(TwoFactorError::SetupExpired)?;

        if !totp::verify_code(&setup.secret, code, Utc::now()) {
            return Err(TwoFactorError::InvalidCode.into());
        }

        self.records.commit(user_id, &setup.secret).await?;
        self.pending.remove(user_id).await?;

        info!(user_id = %user_id, "two-factor enabled");
        Ok(())
    }

    /// Whether the user has the second factor enabled.
    pub async fn is_enabled(&self, user_id: &str) -> Result<bool, CoreError> {
        Ok(self.records.committed_secret(user_id).await?.is_some())
    }

    /// Verifies a code against the committed secret.
    pub async fn verify(&self, user_id: &str, code: &str) -> Result<(), CoreError> {
        let secret = self
            .records
            .committed_secret(user_id)
            .await?
            .ok_or(TwoFactorError::NotAvailable)?;

        if !totp::verify_code(&secret, code, Utc::now()) {
            return Err(TwoFactorError::InvalidCode.into());
        }
        Ok(())
    }

    /// Disables the second factor, requiring proof of possession first.
    pub async fn disable(&self, user_id: &str, code: &str) -> Result<(), CoreError> {
        self.verify(user_id, code).await?;
        self.records.clear(user_id).await?;

        info!(user_id = %user_id, "two-factor disabled");
        Ok(())
    }
}
