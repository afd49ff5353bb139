//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, SessionError, TokenError, TwoFactorError};

use thiserror::Error;

/// Core domain errors.
///
/// Every variant resolves to a stable machine-readable code through
/// [`CoreError::error_code`]; human message text is free to change without
/// breaking clients.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Infrastructure error: {message}")]
    Infrastructure { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    TwoFactor(#[from] TwoFactorError),
}

impl CoreError {
    /// Stable error code for the uniform `{code, message}` payload.
    pub fn error_code(&self) -> &'static str {
        match self {
            CoreError::Validation { .. } => "VALIDATION_ERROR",
            CoreError::Configuration { .. } => "CONFIGURATION_ERROR",
            CoreError::Infrastructure { .. } => "INFRASTRUCTURE_ERROR",
            CoreError::Auth(e) => e.error_code(),
            CoreError::Token(e) => e.error_code(),
            CoreError::Session(e) => e.error_code(),
            CoreError::TwoFactor(e) => e.error_code(),
        }
    }

    /// Shorthand for infrastructure failures surfaced by stores and the key
    /// distribution endpoint.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CoreError::Infrastructure {
            message: message.into(),
        }
    }

    /// Shorthand for configuration failures (fatal at startup, not
    /// per-request).
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration {
            message: message.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
