//! Error types for authentication, tokens, sessions, and the second factor.
//!
//! Codes are stable and machine-readable; messages never reveal which
//! internal check failed.

use thiserror::Error;

/// Authentication errors surfaced during login.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Two-factor code required")]
    TwoFactorRequired,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::TwoFactorRequired => "TWO_FACTOR_REQUIRED",
        }
    }
}

/// Token validation and signing failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Unexpected signing method")]
    UnexpectedSigningMethod,

    #[error("Token missing key id")]
    MissingKeyId,

    #[error("Key not found: {kid}")]
    KeyNotFound { kid: String },

    #[error("Token generation failed")]
    GenerationFailed,
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::Invalid => "TOKEN_INVALID",
            TokenError::UnexpectedSigningMethod => "UNEXPECTED_SIGNING_METHOD",
            TokenError::MissingKeyId => "MISSING_KEY_ID",
            TokenError::KeyNotFound { .. } => "KEY_NOT_FOUND",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// Session state machine failures. All are terminal for the presented
/// credential; replay additionally revokes the session as a side effect.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,

    #[error("Session revoked")]
    Revoked,

    #[error("Refresh token reuse detected")]
    ReplayDetected,

    #[error("Session state invalid")]
    Invalid,
}

impl SessionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotFound => "SESSION_NOT_FOUND",
            SessionError::Revoked => "SESSION_REVOKED",
            SessionError::ReplayDetected => "SESSION_REPLAY_DETECTED",
            SessionError::Invalid => "SESSION_INVALID",
        }
    }
}

/// Second-factor lifecycle failures.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TwoFactorError {
    #[error("Two-factor authentication already enabled")]
    AlreadyEnabled,

    #[error("Two-factor authentication not available")]
    NotAvailable,

    #[error("Two-factor setup expired")]
    SetupExpired,

    #[error("Invalid two-factor code")]
    InvalidCode,
}

impl TwoFactorError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TwoFactorError::AlreadyEnabled => "TWO_FACTOR_ENABLED",
            TwoFactorError::NotAvailable => "TWO_FACTOR_NOT_AVAILABLE",
            TwoFactorError::SetupExpired => "SETUP_EXPIRED",
            TwoFactorError::InvalidCode => "INVALID_CODE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_upper_snake() {
        let codes = [
            AuthError::InvalidCredentials.error_code(),
            TokenError::UnexpectedSigningMethod.error_code(),
            SessionError::NotFound.error_code(),
            TwoFactorError::SetupExpired.error_code(),
        ];
        for code in codes {
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn key_not_found_keeps_kid_out_of_code() {
        let err = TokenError::KeyNotFound {
            kid: "2024-01".to_string(),
        };
        assert_eq!(err.error_code(), "KEY_NOT_FOUND");
        assert!(err.to_string().contains("2024-01"));
    }
}
