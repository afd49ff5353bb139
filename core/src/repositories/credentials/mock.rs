//! Mock credential verifier for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::CoreError;

use super::r#trait::{CredentialVerifier, Principal};

/// Mock verifier backed by a map of registered accounts.
#[derive(Clone, Default)]
pub struct MockCredentialVerifier {
    accounts: Arc<RwLock<HashMap<String, (String, Principal)>>>,
}

impl MockCredentialVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account the verifier will accept.
    pub async fn register(&self, email: &str, password: &str, principal: Principal) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(email.to_string(), (password.to_string(), principal));
    }
}

#[async_trait]
impl CredentialVerifier for MockCredentialVerifier {
    async fn verify(&self, email: &str, password: &str) -> Result<Option<Principal>, CoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .get(email)
            .filter(|(stored, _)| stored == password)
            .map(|(_, principal)| principal.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepts_registered_credentials_only() {
        let verifier = MockCredentialVerifier::new();
        verifier
            .register(
                "user@example.com",
                "hunter2",
                Principal {
                    user_id: "user-1".to_string(),
                },
            )
            .await;

        let principal = verifier
            .verify("user@example.com", "hunter2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(principal.user_id, "user-1");

        assert!(verifier
            .verify("user@example.com", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(verifier
            .verify("nobody@example.com", "hunter2")
            .await
            .unwrap()
            .is_none());
    }
}
