//! API response types

use serde::{Deserialize, Serialize};

/// Uniform error payload returned by every endpoint.
///
/// `code` is a stable machine-readable identifier; `message` is free-form
/// human text and carries no internal detail about which check failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code (UPPER_SNAKE)
    pub code: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_serializes_code_and_message() {
        let response = ErrorResponse::new("TOKEN_EXPIRED", "Token has expired");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["code"], "TOKEN_EXPIRED");
        assert_eq!(json["message"], "Token has expired");
    }
}
