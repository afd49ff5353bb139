//! Token signing and verification configuration

use serde::{Deserialize, Serialize};

/// Token configuration as loaded from the environment.
///
/// Key material itself is external: the service consumes an already-generated
/// Ed25519 private key (PKCS#8 PEM) and an already-published JWKS document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenSettings {
    /// Issuer claim stamped into every token
    pub issuer: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_ttl_secs: u64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_secs: u64,

    /// HMAC secret for refresh tokens; never shared outside the issuer
    pub refresh_secret: String,

    /// Path to the PEM-encoded Ed25519 private key used for access tokens
    pub private_key_path: String,

    /// Key id published for the active signing key
    pub kid: String,

    /// Path to the JWKS document covering the active and recently retired keys
    pub jwks_path: String,

    /// Base URL of the issuer, used by verifying services to fetch the JWKS
    #[serde(default)]
    pub jwks_base_url: Option<String>,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            issuer: String::from("keygate"),
            access_ttl_secs: default_access_ttl(),
            refresh_ttl_secs: default_refresh_ttl(),
            refresh_secret: String::new(),
            private_key_path: String::from("keys/access_ed25519.pem"),
            kid: String::new(),
            jwks_path: String::from("keys/jwks.json"),
            jwks_base_url: None,
        }
    }
}

impl TokenSettings {
    /// Load settings from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            issuer: std::env::var("TOKEN_ISSUER").unwrap_or(defaults.issuer),
            access_ttl_secs: env_u64("TOKEN_ACCESS_TTL", defaults.access_ttl_secs),
            refresh_ttl_secs: env_u64("TOKEN_REFRESH_TTL", defaults.refresh_ttl_secs),
            refresh_secret: std::env::var("TOKEN_REFRESH_SECRET").unwrap_or_default(),
            private_key_path: std::env::var("TOKEN_PRIVATE_KEY_FILE")
                .unwrap_or(defaults.private_key_path),
            kid: std::env::var("TOKEN_ACCESS_KID").unwrap_or_default(),
            jwks_path: std::env::var("TOKEN_JWKS_FILE").unwrap_or(defaults.jwks_path),
            jwks_base_url: std::env::var("TOKEN_JWKS_BASE_URL").ok(),
        }
    }

    /// Whether the settings carry everything the issuer needs to sign tokens.
    pub fn is_complete(&self) -> bool {
        !self.refresh_secret.is_empty() && !self.kid.is_empty()
    }
}

fn default_access_ttl() -> u64 {
    15 * 60
}

fn default_refresh_ttl() -> u64 {
    7 * 24 * 60 * 60
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_short_access_and_long_refresh() {
        let settings = TokenSettings::default();
        assert_eq!(settings.access_ttl_secs, 900);
        assert_eq!(settings.refresh_ttl_secs, 604_800);
        assert!(!settings.is_complete());
    }

    #[test]
    fn complete_requires_secret_and_kid() {
        let settings = TokenSettings {
            refresh_secret: "secret".to_string(),
            kid: "2024-01".to_string(),
            ..Default::default()
        };
        assert!(settings.is_complete());
    }
}
