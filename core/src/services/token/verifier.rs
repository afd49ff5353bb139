//! Offline access-token verification.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use crate::domain::entities::token::AccessClaims;
use crate::errors::{CoreError, TokenError};

use super::keys::{Jwks, KeyRing};

/// Resolves a key id to a verification key.
///
/// The production implementation fetches and caches the issuer's published
/// JWKS over the network; the issuer process itself resolves against its own
/// key ring. There is deliberately no fallback key: an unknown `kid` is a
/// verification failure.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, CoreError>;
}

/// Key source over a fixed, in-memory key set.
#[derive(Debug, Clone)]
pub struct StaticKeySource {
    jwks: Jwks,
}

impl StaticKeySource {
    pub fn new(jwks: Jwks) -> Self {
        Self { jwks }
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, CoreError> {
        self.jwks.decoding_key(kid)
    }
}

/// The issuer's own ring doubles as a key source, so the issuing process can
/// verify the tokens it minted without going through the network.
#[async_trait]
impl KeySource for KeyRing {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, CoreError> {
        self.current()?.published().decoding_key(kid)
    }
}

/// Validates access tokens fully offline using published public keys.
pub struct TokenVerifier<K: KeySource> {
    key_source: Arc<K>,
    validation: Validation,
}

impl<K: KeySource> TokenVerifier<K> {
    pub fn new(key_source: Arc<K>) -> Self {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.leeway = 0;

        Self {
            key_source,
            validation,
        }
    }

    /// Verifies an access token and returns the claims.
    ///
    /// Rejects any token not signed with the expected asymmetric algorithm
    /// before touching key material, requires a `kid` header, and resolves it
    /// exclusively through the key source.
    pub async fn verify_access(&self, token: &str) -> Result<AccessClaims, CoreError> {
        let header = decode_header(token).map_err(|_| TokenError::Invalid)?;

        if header.alg != Algorithm::EdDSA {
            return Err(TokenError::UnexpectedSigningMethod.into());
        }

        let kid = header.kid.ok_or(TokenError::MissingKeyId)?;
        let key = self.key_source.decoding_key(&kid).await?;

        let data = decode::<AccessClaims>(token, &key, &self.validation).map_err(|e| {
            if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                TokenError::Expired
            } else {
                TokenError::Invalid
            }
        })?;

        Ok(data.claims)
    }
}
