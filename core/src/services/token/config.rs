//! Configuration for the token services

use chrono::Duration;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};

/// Configuration for token signing and lifetimes.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC secret for refresh tokens, known only to the issuer
    pub refresh_secret: String,
    /// Access token lifetime in seconds
    pub access_ttl_secs: i64,
    /// Refresh token lifetime in seconds; also the session record TTL
    pub refresh_ttl_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            refresh_secret: String::new(),
            access_ttl_secs: ACCESS_TOKEN_EXPIRY_MINUTES * 60,
            refresh_ttl_secs: REFRESH_TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
        }
    }
}

impl TokenConfig {
    /// Config with the given refresh secret and default lifetimes.
    pub fn new(refresh_secret: impl Into<String>) -> Self {
        Self {
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::seconds(self.access_ttl_secs)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::seconds(self.refresh_ttl_secs)
    }

    /// Refresh lifetime as a std duration for store TTLs.
    pub fn refresh_ttl_std(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.refresh_ttl_secs.max(0) as u64)
    }
}
