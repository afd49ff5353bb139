//! Credential verification boundary.
//!
//! Password storage and the hash primitive live outside this workspace; the
//! login flow only needs an opaque verify returning the authenticated
//! principal.

use async_trait::async_trait;

use crate::errors::CoreError;

/// The authenticated identity returned by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
}

/// One-way credential check against the external user store.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Returns the principal when the email/password pair is valid,
    /// `Ok(None)` otherwise. Which component failed is never revealed.
    async fn verify(&self, email: &str, password: &str) -> Result<Option<Principal>, CoreError>;
}
