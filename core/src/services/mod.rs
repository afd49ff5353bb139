//! Business services containing domain logic and use cases.

pub mod session;
pub mod token;
pub mod two_factor;

// Re-export commonly used types
pub use session::SessionRotator;
pub use token::{
    Jwk, Jwks, KeyRing, KeySource, SigningKeySet, StaticKeySource, TokenConfig, TokenIssuer,
    TokenVerifier,
};
pub use two_factor::TwoFactorService;
