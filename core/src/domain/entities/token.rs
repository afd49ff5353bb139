//! Token claim entities for the two token flavors.
//!
//! Access tokens are signed asymmetrically and verified offline by other
//! services; refresh tokens are HMAC-signed and never leave the issuing
//! process for verification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Claims carried by an access token.
///
/// `av` is the per-session access version: it is bumped on every rotation so
/// the liveness check can reject access tokens issued before the latest
/// rotation while they are still inside their own expiry window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Session ID the token belongs to
    pub sid: String,

    /// Access version at issue time
    pub av: u64,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl AccessClaims {
    /// Creates claims for a new access token expiring `ttl` from now.
    pub fn new(user_id: &str, session_id: &str, access_version: u64, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            av: access_version,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Expiry as a timestamp type.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Claims carried by a refresh token.
///
/// `rid` identifies this particular refresh token within its session; the
/// session record tracks which `rid` is current and which was rotated out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Session ID the token belongs to
    pub sid: String,

    /// Refresh token ID
    pub rid: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl RefreshClaims {
    /// Creates claims for a new refresh token expiring `ttl` from now.
    pub fn new(user_id: &str, session_id: &str, refresh_id: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            rid: refresh_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Expiry as a timestamp type.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with explicit lifetimes in seconds.
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
