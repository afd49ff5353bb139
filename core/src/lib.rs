//! # KeyGate Core
//!
//! Core domain layer for the KeyGate authentication services.
//! This crate contains the token issuing and verification services, the
//! session rotation state machine, the TOTP second-factor gate, the
//! repository interfaces they depend on, and the error taxonomy shared by
//! every crate in the workspace.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod testutil;

// Re-export the error taxonomy at the crate root for convenience
pub use errors::{AuthError, CoreError, CoreResult, SessionError, TokenError, TwoFactorError};
