//! Token services: signing, verification, and key distribution types.
//!
//! The issuing side signs access tokens with the active Ed25519 key and
//! refresh tokens with an HMAC secret that never leaves the process. The
//! verifying side resolves public keys by `kid` through a [`KeySource`] so it
//! never needs a per-request call back to the issuer.

mod config;
mod issuer;
mod keys;
mod verifier;


pub use config::TokenConfig;
pub use issuer::TokenIssuer;
pub use keys::{Jwk, Jwks, KeyRing, SigningKeySet};
pub use verifier::{KeySource, StaticKeySource, TokenVerifier};
