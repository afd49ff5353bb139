//! Session repository trait defining the interface for session persistence.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::session::Session;
use crate::errors::CoreError;

/// Repository trait for the durable-with-TTL session record.
///
/// The record is the single source of truth for revocation and rotation
/// state. Rotation is a read-modify-write against a shared record, so the
/// conditional update is part of the contract: implementations must make
/// [`update_if_current`](SessionRepository::update_if_current) atomic with
/// respect to concurrent writers on the same session id.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session with the given TTL.
    ///
    /// Inserting an id that already exists is an error; session ids are
    /// generated unguessably and never reused.
    async fn insert(&self, session: Session, ttl: Duration) -> Result<(), CoreError>;

    /// Load a session by id.
    ///
    /// Returns `Ok(None)` when the record is absent or its TTL has lapsed.
    async fn find(&self, session_id: &str) -> Result<Option<Session>, CoreError>;

    /// Conditionally replace a session record and refresh its TTL.
    ///
    /// The write only happens if the stored record still carries
    /// `expected_refresh_id` / `expected_version`; otherwise another rotation
    /// won the race and `Ok(false)` is returned. Exactly one of two
    /// concurrent callers succeeds.
    async fn update_if_current(
        &self,
        expected_refresh_id: &str,
        expected_version: u64,
        updated: Session,
        ttl: Duration,
    ) -> Result<bool, CoreError>;

    /// Mark a session revoked, preserving the record's remaining TTL.
    ///
    /// Idempotent: revoking an absent or already-revoked session is `Ok`.
    async fn revoke(&self, session_id: &str) -> Result<(), CoreError>;

    /// Remove a session record outright.
    async fn delete(&self, session_id: &str) -> Result<(), CoreError>;
}
