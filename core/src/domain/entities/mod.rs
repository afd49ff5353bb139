//! Domain entities representing core business objects.

pub mod session;
pub mod token;
pub mod two_factor;

// Re-export commonly used types
pub use session::{Session, SessionStatus};
pub use token::{
    AccessClaims, RefreshClaims, TokenPair,
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use two_factor::TwoFactorSetup;
