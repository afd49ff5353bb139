//! Caller provenance threaded explicitly through login and refresh calls.

use serde::{Deserialize, Serialize};

/// Client IP and user agent captured on the session record.
///
/// Passed as an explicit parameter rather than ambient per-request state so
/// internal service-to-service calls can forward the original caller's
/// metadata without terminating the client connection at the issuer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

impl ClientInfo {
    pub fn new(ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            user_agent: user_agent.into(),
        }
    }
}
