//! Route handlers.

pub mod auth;
pub mod jwks;
pub mod two_factor;

pub use auth::AppState;
