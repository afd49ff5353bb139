//! Signing key material and the published key set.
//!
//! Key generation and rotation tooling live outside this crate: the issuer
//! consumes an already-generated Ed25519 private key (PKCS#8 PEM) and an
//! already-published JWKS document covering the active key plus any recently
//! retired keys whose tokens may still be in flight.

use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, TokenError};

/// Ed25519 public key length in bytes
const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// A single published verification key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type; always `OKP` for Ed25519
    pub kty: String,
    /// Curve name
    pub crv: String,
    /// Key usage
    #[serde(rename = "use")]
    pub usage: String,
    /// Key id referenced by token headers
    pub kid: String,
    /// Base64url-encoded raw public key
    pub x: String,
}

impl Jwk {
    /// Builds the decoding key, validating type, curve, and key length.
    pub fn decoding_key(&self) -> Result<DecodingKey, CoreError> {
        if self.kty != "OKP" || self.crv != "Ed25519" {
            return Err(CoreError::configuration(format!(
                "unsupported JWK: kty={}, crv={}",
                self.kty, self.crv
            )));
        }

        let raw = URL_SAFE_NO_PAD
            .decode(self.x.as_bytes())
            .map_err(|e| CoreError::configuration(format!("invalid JWK x value: {e}")))?;
        if raw.len() != ED25519_PUBLIC_KEY_LEN {
            return Err(CoreError::configuration(format!(
                "invalid Ed25519 public key size: {}",
                raw.len()
            )));
        }

        DecodingKey::from_ed_components(&self.x)
            .map_err(|e| CoreError::configuration(format!("invalid JWK public key: {e}")))
    }
}

/// The published key set served at `/.well-known/jwks.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    /// Parse a JWKS document from JSON.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::configuration(format!("failed to parse JWKS: {e}")))
    }

    /// Find a key by id.
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }

    /// Resolve a key id to a decoding key.
    pub fn decoding_key(&self, kid: &str) -> Result<DecodingKey, CoreError> {
        let jwk = self.find(kid).ok_or(TokenError::KeyNotFound {
            kid: kid.to_string(),
        })?;
        jwk.decoding_key()
    }
}

/// The active signing key plus the published verification set.
///
/// Immutable once constructed; rotation means loading a new set and swapping
/// it into the [`KeyRing`].
#[derive(Clone)]
pub struct SigningKeySet {
    kid: String,
    encoding_key: EncodingKey,
    published: Jwks,
}

impl std::fmt::Debug for SigningKeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeySet")
            .field("kid", &self.kid)
            .field("published_keys", &self.published.keys.len())
            .finish()
    }
}

impl SigningKeySet {
    /// Creates a key set from PEM and JWKS strings.
    pub fn from_pem(
        kid: impl Into<String>,
        private_key_pem: &str,
        published: Jwks,
    ) -> Result<Self, CoreError> {
        let kid = kid.into();
        let encoding_key = EncodingKey::from_ed_pem(private_key_pem.as_bytes())
            .map_err(|e| CoreError::configuration(format!("invalid Ed25519 private key: {e}")))?;

        if published.find(&kid).is_none() {
            return Err(CoreError::configuration(format!(
                "active kid {kid} is not in the published key set"
            )));
        }

        Ok(Self {
            kid,
            encoding_key,
            published,
        })
    }

    /// Creates a key set from key material on disk.
    pub fn from_files<P: AsRef<Path>>(
        kid: impl Into<String>,
        private_key_path: P,
        jwks_path: P,
    ) -> Result<Self, CoreError> {
        let private_key_pem = fs::read_to_string(&private_key_path).map_err(|e| {
            CoreError::configuration(format!("failed to read private key: {e}"))
        })?;
        let jwks_json = fs::read_to_string(&jwks_path)
            .map_err(|e| CoreError::configuration(format!("failed to read JWKS: {e}")))?;

        Self::from_pem(kid, &private_key_pem, Jwks::from_json(&jwks_json)?)
    }

    /// Id of the active signing key, stamped into token headers.
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Encoding key for signing access tokens.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// The full published verification set.
    pub fn published(&self) -> &Jwks {
        &self.published
    }
}

/// Handle to the currently loaded signing key set.
///
/// Readers take a cheap snapshot; rotation swaps in a freshly loaded set
/// behind the guard without touching in-flight signs.
#[derive(Debug, Default)]
pub struct KeyRing {
    inner: RwLock<Option<Arc<SigningKeySet>>>,
}

impl KeyRing {
    /// Ring holding the given key set.
    pub fn new(set: SigningKeySet) -> Self {
        Self {
            inner: RwLock::new(Some(Arc::new(set))),
        }
    }

    /// Ring with no key material loaded; signing fails until a swap.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of the current key set.
    pub fn current(&self) -> Result<Arc<SigningKeySet>, CoreError> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard
            .clone()
            .ok_or_else(|| CoreError::configuration("no signing key loaded"))
    }

    /// Replace the key set.
    pub fn swap(&self, set: SigningKeySet) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Arc::new(set));
    }

    /// The published verification set of the current keys.
    pub fn published(&self) -> Result<Jwks, CoreError> {
        Ok(self.current()?.published().clone())
    }
}
