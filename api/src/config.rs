//! Service configuration assembled from the environment.

use kg_shared::config::{CacheConfig, Environment, ServerConfig, TokenSettings};

/// Complete issuer-service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub token: TokenSettings,
    /// Name shown in authenticator apps for provisioned secrets
    pub two_factor_issuer: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            token: TokenSettings::from_env(),
            two_factor_issuer: std::env::var("TWO_FACTOR_ISSUER")
                .unwrap_or_else(|_| "KeyGate".to_string()),
        }
    }
}
