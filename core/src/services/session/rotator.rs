//! The session state machine driving login, refresh, and logout.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::session::Session;
use crate::domain::entities::token::{RefreshClaims, TokenPair};
use crate::domain::value_objects::ClientInfo;
use crate::errors::{CoreError, SessionError};
use crate::repositories::session::SessionRepository;
use crate::services::token::TokenIssuer;

/// Owns every transition of the session record.
///
/// Sessions move `ACTIVE -> ACTIVE` on successful rotation and
/// `ACTIVE -> REVOKED` on logout or detected refresh-token reuse; `REVOKED`
/// is terminal. The record's TTL equals the refresh-token lifetime and is
/// refreshed on every rotation.
pub struct SessionRotator<S: SessionRepository> {
    store: S,
    issuer: Arc<TokenIssuer>,
}

impl<S: SessionRepository> SessionRotator<S> {
    pub fn new(store: S, issuer: Arc<TokenIssuer>) -> Self {
        Self { store, issuer }
    }

    /// Creates a session for a freshly authenticated user and returns its
    /// first token pair.
    pub async fn issue_initial_tokens(
        &self,
        user_id: &str,
        client: &ClientInfo,
    ) -> Result<TokenPair, CoreError> {
        let session_id = Uuid::new_v4().to_string();
        let refresh_id = Uuid::new_v4().to_string();

        let session = Session::new(&session_id, user_id, &refresh_id, client);

        let (access_token, _) = self
            .issuer
            .sign_access(user_id, &session_id, session.access_version)?;
        let (refresh_token, _) = self.issuer.sign_refresh(user_id, &session_id, &refresh_id)?;

        self.store
            .insert(session, self.issuer.config().refresh_ttl_std())
            .await?;

        info!(session_id = %session_id, user_id = %user_id, "session issued");

        Ok(self.pair(access_token, refresh_token))
    }

    /// Rotates a session on presentation of a verified refresh token.
    ///
    /// The presented refresh id must equal the stored `current_refresh_id`.
    /// A match against `previous_refresh_id` is replay of a token that was
    /// already rotated out, which revokes the session on the spot: a stolen
    /// refresh token reused after the legitimate client rotated is the
    /// primary threat this check defends against.
    pub async fn rotate_on_refresh(
        &self,
        claims: &RefreshClaims,
        client: &ClientInfo,
    ) -> Result<TokenPair, CoreError> {
        let session = self
            .store
            .find(&claims.sid)
            .await?
            .ok_or(SessionError::NotFound)?;

        if !session.is_active() {
            return Err(SessionError::Revoked.into());
        }

        if claims.rid != session.current_refresh_id {
            if claims.rid == session.previous_refresh_id {
                warn!(session_id = %claims.sid, "refresh token reuse detected, revoking session");
                self.store.revoke(&claims.sid).await?;
                return Err(SessionError::ReplayDetected.into());
            }
            return Err(SessionError::Invalid.into());
        }

        let new_refresh_id = Uuid::new_v4().to_string();
        let rotated = session.rotated(&new_refresh_id, client);

        let (access_token, _) =
            self.issuer
                .sign_access(&session.user_id, &claims.sid, rotated.access_version)?;
        let (refresh_token, _) =
            self.issuer
                .sign_refresh(&session.user_id, &claims.sid, &new_refresh_id)?;

        let won = self
            .store
            .update_if_current(
                &session.current_refresh_id,
                session.access_version,
                rotated,
                self.issuer.config().refresh_ttl_std(),
            )
            .await?;
        if !won {
            // A concurrent rotation replaced the record between our read and
            // write; the caller may retry against the fresh state.
            return Err(SessionError::Invalid.into());
        }

        info!(session_id = %claims.sid, "session rotated");

        Ok(self.pair(access_token, refresh_token))
    }

    /// Revokes a session. Idempotent: revoking an absent or already-revoked
    /// session is not an error.
    pub async fn revoke_session(&self, session_id: &str) -> Result<(), CoreError> {
        self.store.revoke(session_id).await?;
        info!(session_id = %session_id, "session revoked");
        Ok(())
    }

    /// Liveness check used by the request middleware.
    ///
    /// Version-checked: the session must exist, be active, and its stored
    /// access version must equal the token's, so rotation instantly
    /// invalidates all older access tokens even inside their expiry window.
    pub async fn is_live(&self, session_id: &str, access_version: u64) -> Result<bool, CoreError> {
        let session = match self.store.find(session_id).await? {
            Some(session) => session,
            None => return Ok(false),
        };

        Ok(session.is_active() && session.access_version == access_version)
    }

    fn pair(&self, access_token: String, refresh_token: String) -> TokenPair {
        let config = self.issuer.config();
        TokenPair::new(
            access_token,
            refresh_token,
            config.access_ttl_secs,
            config.refresh_ttl_secs,
        )
    }
}
