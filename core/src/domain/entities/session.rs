//! Session entity: the store-side record of a single login.
//!
//! A session is created at login, mutated only by rotation, and terminated by
//! logout or replay detection. The record is the single source of truth for
//! revocation and rotation state; the serialized layout is the wire format of
//! the `auth:session:<session_id>` store entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ClientInfo;

/// Lifecycle state of a session. `Revoked` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Revoked,
}

/// A single login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque, unguessable session identifier
    pub session_id: String,

    /// Owner of the session
    pub user_id: String,

    /// Lifecycle status
    pub status: SessionStatus,

    /// Monotonic counter, bumped by exactly one per successful rotation
    pub access_version: u64,

    /// Refresh id embedded in the most recently issued, unconsumed token
    pub current_refresh_id: String,

    /// Refresh id that was rotated out by the last rotation; empty before
    /// the first rotation
    pub previous_refresh_id: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the refresh token was last rotated
    pub rotated_at: DateTime<Utc>,

    /// Client IP captured at login / last rotation
    pub ip: String,

    /// Client user agent captured at login / last rotation
    pub user_agent: String,
}

impl Session {
    /// Creates a fresh session at `access_version = 1` with no rotation
    /// history.
    pub fn new(session_id: &str, user_id: &str, refresh_id: &str, client: &ClientInfo) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.to_string(),
            user_id: user_id.to_string(),
            status: SessionStatus::Active,
            access_version: 1,
            current_refresh_id: refresh_id.to_string(),
            previous_refresh_id: String::new(),
            created_at: now,
            rotated_at: now,
            ip: client.ip.clone(),
            user_agent: client.user_agent.clone(),
        }
    }

    /// Returns a copy advanced by one rotation: the current refresh id moves
    /// to `previous_refresh_id`, the new id becomes current, the access
    /// version is bumped, and provenance is refreshed.
    pub fn rotated(&self, new_refresh_id: &str, client: &ClientInfo) -> Self {
        let mut next = self.clone();
        next.previous_refresh_id = std::mem::replace(
            &mut next.current_refresh_id,
            new_refresh_id.to_string(),
        );
        next.access_version += 1;
        next.rotated_at = Utc::now();
        next.ip = client.ip.clone();
        next.user_agent = client.user_agent.clone();
        next
    }

    /// Whether the session is still usable.
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}
