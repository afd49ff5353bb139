//! Redis-backed session repository.
//!
//! One JSON record per session under `auth:session:<session_id>` with
//! TTL = refresh-token lifetime. Rotation uses a server-side script so the
//! compare-and-swap against the previously read rotation state is atomic:
//! two concurrent rotations of the same session get exactly one winner.

use async_trait::async_trait;
use redis::Script;
use std::time::Duration;
use tracing::debug;

use kg_core::domain::entities::session::Session;
use kg_core::errors::CoreError;
use kg_core::repositories::session::SessionRepository;

use super::redis_client::RedisClient;

/// Redis key prefix for session records
const SESSION_KEY_PREFIX: &str = "auth:session";

/// Compare-and-swap: replace the record only if the stored rotation state
/// still matches what the caller read.
const ROTATE_SCRIPT: &str = r#"
local raw = redis.call('GET', KEYS[1])
if not raw then
  return 0
end
local sess = cjson.decode(raw)
if sess['current_refresh_id'] ~= ARGV[1] then
  return 0
end
if tonumber(sess['access_version']) ~= tonumber(ARGV[2]) then
  return 0
end
redis.call('SET', KEYS[1], ARGV[3], 'EX', tonumber(ARGV[4]))
return 1
"#;

/// Flip the record to revoked in place, keeping its remaining TTL so the
/// refusal reason stays distinguishable from plain expiry.
const REVOKE_SCRIPT: &str = r#"
local raw = redis.call('GET', KEYS[1])
if not raw then
  return 0
end
local sess = cjson.decode(raw)
sess['status'] = 'revoked'
local ttl = redis.call('TTL', KEYS[1])
local updated = cjson.encode(sess)
if ttl > 0 then
  redis.call('SET', KEYS[1], updated, 'EX', ttl)
else
  redis.call('SET', KEYS[1], updated)
end
return 1
"#;

/// Production session store over Redis.
pub struct RedisSessionStore {
    client: RedisClient,
    rotate_script: Script,
    revoke_script: Script,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            rotate_script: Script::new(ROTATE_SCRIPT),
            revoke_script: Script::new(REVOKE_SCRIPT),
        }
    }

    /// Format the storage key for a session id.
    fn session_key(session_id: &str) -> String {
        format!("{SESSION_KEY_PREFIX}:{session_id}")
    }

    fn encode(session: &Session) -> Result<String, CoreError> {
        serde_json::to_string(session)
            .map_err(|e| CoreError::infrastructure(format!("failed to encode session: {e}")))
    }

    fn decode(raw: &str) -> Result<Session, CoreError> {
        serde_json::from_str(raw)
            .map_err(|e| CoreError::infrastructure(format!("failed to decode session: {e}")))
    }
}

#[async_trait]
impl SessionRepository for RedisSessionStore {
    async fn insert(&self, session: Session, ttl: Duration) -> Result<(), CoreError> {
        let key = Self::session_key(&session.session_id);
        let payload = Self::encode(&session)?;

        let created = self.client.set_if_absent(&key, &payload, ttl).await?;
        if !created {
            return Err(CoreError::Validation {
                message: "session already exists".to_string(),
            });
        }

        debug!(session_id = %session.session_id, "session record created");
        Ok(())
    }

    async fn find(&self, session_id: &str) -> Result<Option<Session>, CoreError> {
        let raw = self.client.get(&Self::session_key(session_id)).await?;
        raw.map(|r| Self::decode(&r)).transpose()
    }

    async fn update_if_current(
        &self,
        expected_refresh_id: &str,
        expected_version: u64,
        updated: Session,
        ttl: Duration,
    ) -> Result<bool, CoreError> {
        let key = Self::session_key(&updated.session_id);
        let payload = Self::encode(&updated)?;

        let mut invocation = self.rotate_script.prepare_invoke();
        invocation
            .key(key)
            .arg(expected_refresh_id)
            .arg(expected_version)
            .arg(payload)
            .arg(ttl.as_secs());

        let won: i64 = self.client.invoke_script(&invocation).await?;
        Ok(won == 1)
    }

    async fn revoke(&self, session_id: &str) -> Result<(), CoreError> {
        let mut invocation = self.revoke_script.prepare_invoke();
        invocation.key(Self::session_key(session_id));

        // 0 means the record is already gone, which is fine: revocation is
        // idempotent.
        let _: i64 = self.client.invoke_script(&invocation).await?;
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<(), CoreError> {
        self.client.delete(&Self::session_key(session_id)).await?;
        Ok(())
    }
}
