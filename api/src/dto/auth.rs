use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 256))]
    pub password: String,

    /// 6-digit TOTP code; required once the account has the second factor
    /// enabled
    #[serde(default)]
    pub totp_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token; may instead arrive as the HTTP-only cookie
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_in: i64,
    pub refresh_expires_in: i64,
}

impl From<kg_core::domain::entities::token::TokenPair> for TokenResponse {
    fn from(pair: kg_core::domain::entities::token::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            access_expires_in: pair.access_expires_in,
            refresh_expires_in: pair.refresh_expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn login_request_requires_an_email_shape() {
        let bad = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
            totp_code: None,
        };
        assert!(bad.validate().is_err());

        let good = LoginRequest {
            email: "user@example.com".to_string(),
            password: "secret".to_string(),
            totp_code: None,
        };
        assert!(good.validate().is_ok());
    }

    #[test]
    fn refresh_request_token_is_optional() {
        let parsed: RefreshRequest = serde_json::from_str("{}").unwrap();
        assert!(parsed.refresh_token.is_none());
    }
}
