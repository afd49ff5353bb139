//! In-memory implementation of the session repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::entities::session::{Session, SessionStatus};
use crate::errors::CoreError;

use super::r#trait::SessionRepository;

struct Entry {
    session: Session,
    expires_at: Instant,
}

/// In-memory session repository honoring TTLs and the conditional update.
///
/// The conditional update runs entirely under the write lock, which gives it
/// the same one-winner semantics the production store provides atomically.
#[derive(Clone, Default)]
pub struct MemorySessionRepository {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn live(entry: &Entry) -> bool {
        Instant::now() < entry.expires_at
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn insert(&self, session: Session, ttl: Duration) -> Result<(), CoreError> {
        let mut entries = self.entries.write().await;

        if let Some(existing) = entries.get(&session.session_id) {
            if Self::live(existing) {
                return Err(CoreError::Validation {
                    message: "session already exists".to_string(),
                });
            }
        }

        entries.insert(
            session.session_id.clone(),
            Entry {
                session,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn find(&self, session_id: &str) -> Result<Option<Session>, CoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(session_id)
            .filter(|e| Self::live(e))
            .map(|e| e.session.clone()))
    }

    async fn update_if_current(
        &self,
        expected_refresh_id: &str,
        expected_version: u64,
        updated: Session,
        ttl: Duration,
    ) -> Result<bool, CoreError> {
        let mut entries = self.entries.write().await;

        let current = match entries.get(&updated.session_id).filter(|e| Self::live(e)) {
            Some(entry) => &entry.session,
            None => return Ok(false),
        };

        if current.current_refresh_id != expected_refresh_id
            || current.access_version != expected_version
        {
            return Ok(false);
        }

        entries.insert(
            updated.session_id.clone(),
            Entry {
                session: updated,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(true)
    }

    async fn revoke(&self, session_id: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(session_id) {
            entry.session.status = SessionStatus::Revoked;
        }
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.write().await;
        entries.remove(session_id);
        Ok(())
    }
}
