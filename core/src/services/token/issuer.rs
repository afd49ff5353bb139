//! Token issuing service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{AccessClaims, RefreshClaims};
use crate::errors::{CoreError, TokenError};

use super::config::TokenConfig;
use super::keys::KeyRing;

/// Signs access tokens asymmetrically and refresh tokens symmetrically.
///
/// Access tokens carry the active key id in their header so verifiers can
/// select the matching public key without a shared secret. Refresh tokens are
/// HMAC-signed and verified only inside this process.
pub struct TokenIssuer {
    keys: Arc<KeyRing>,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    refresh_validation: Validation,
    config: TokenConfig,
}

impl TokenIssuer {
    /// Creates an issuer from the key ring and token configuration.
    ///
    /// Fails when the refresh secret is missing; the asymmetric key may be
    /// loaded later through the ring.
    pub fn new(keys: Arc<KeyRing>, config: TokenConfig) -> Result<Self, CoreError> {
        if config.refresh_secret.is_empty() {
            return Err(CoreError::configuration("refresh token secret is not set"));
        }

        let refresh_encoding = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut refresh_validation = Validation::new(Algorithm::HS256);
        refresh_validation.leeway = 0;

        Ok(Self {
            keys,
            refresh_encoding,
            refresh_decoding,
            refresh_validation,
            config,
        })
    }

    /// Signs an access token for the given session state.
    pub fn sign_access(
        &self,
        user_id: &str,
        session_id: &str,
        access_version: u64,
    ) -> Result<(String, DateTime<Utc>), CoreError> {
        let keys = self.keys.current()?;

        let claims = AccessClaims::new(user_id, session_id, access_version, self.config.access_ttl());
        let expires_at = claims.expires_at().ok_or(TokenError::GenerationFailed)?;

        let mut header = Header::new(Algorithm::EdDSA);
        header.kid = Some(keys.kid().to_string());

        let token = encode(&header, &claims, keys.encoding_key())
            .map_err(|_| TokenError::GenerationFailed)?;

        Ok((token, expires_at))
    }

    /// Signs a refresh token bound to the given refresh id.
    pub fn sign_refresh(
        &self,
        user_id: &str,
        session_id: &str,
        refresh_id: &str,
    ) -> Result<(String, DateTime<Utc>), CoreError> {
        let claims = RefreshClaims::new(user_id, session_id, refresh_id, self.config.refresh_ttl());
        let expires_at = claims.expires_at().ok_or(TokenError::GenerationFailed)?;

        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, &self.refresh_encoding)
            .map_err(|_| TokenError::GenerationFailed)?;

        Ok((token, expires_at))
    }

    /// Verifies a refresh token and returns its claims.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, CoreError> {
        let data = decode::<RefreshClaims>(token, &self.refresh_decoding, &self.refresh_validation)
            .map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    TokenError::Expired
                } else {
                    TokenError::Invalid
                }
            })?;

        Ok(data.claims)
    }

    /// Token configuration, shared with the session rotator for TTLs.
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }
}
