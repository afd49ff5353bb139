pub mod auth;
pub mod error;
pub mod two_factor;

pub use auth::{LoginRequest, LogoutResponse, RefreshRequest, TokenResponse};
pub use error::ErrorResponse;
pub use two_factor::{TwoFactorCodeRequest, TwoFactorSetupResponse};
