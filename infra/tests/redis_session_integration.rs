//! Live-Redis round trips for the session and pending-secret stores.
//!
//! Requires a Redis instance at `REDIS_URL` (default `redis://127.0.0.1:6379`).
//! Run with `cargo test -p kg_infra -- --ignored`.

use std::time::Duration;

use uuid::Uuid;

use kg_core::domain::entities::session::Session;
use kg_core::domain::entities::two_factor::TwoFactorSetup;
use kg_core::domain::value_objects::ClientInfo;
use kg_core::repositories::session::SessionRepository;
use kg_core::repositories::two_factor::PendingSecretStore;
use kg_infra::cache::{CacheConfig, RedisClient, RedisPendingSecretStore, RedisSessionStore};

const TTL: Duration = Duration::from_secs(60);

async fn client() -> RedisClient {
    RedisClient::new(CacheConfig::from_env())
        .await
        .expect("Redis must be reachable for ignored integration tests")
}

fn session(session_id: &str, refresh_id: &str) -> Session {
    Session::new(
        session_id,
        "user-integration",
        refresh_id,
        &ClientInfo::new("127.0.0.1", "integration-tests"),
    )
}

#[tokio::test]
#[ignore]
async fn session_record_round_trip() {
    let store = RedisSessionStore::new(client().await);
    let sid = Uuid::new_v4().to_string();

    store.insert(session(&sid, "rid-0"), TTL).await.unwrap();

    let loaded = store.find(&sid).await.unwrap().unwrap();
    assert_eq!(loaded.current_refresh_id, "rid-0");
    assert_eq!(loaded.access_version, 1);

    store.delete(&sid).await.unwrap();
    assert!(store.find(&sid).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn conditional_update_has_one_winner() {
    let store = RedisSessionStore::new(client().await);
    let sid = Uuid::new_v4().to_string();
    let first = session(&sid, "rid-0");

    store.insert(first.clone(), TTL).await.unwrap();

    let client_info = ClientInfo::new("127.0.0.1", "integration-tests");
    let winner = first.rotated("rid-1", &client_info);
    let loser = first.rotated("rid-2", &client_info);

    assert!(store
        .update_if_current("rid-0", 1, winner, TTL)
        .await
        .unwrap());
    assert!(!store
        .update_if_current("rid-0", 1, loser, TTL)
        .await
        .unwrap());

    let stored = store.find(&sid).await.unwrap().unwrap();
    assert_eq!(stored.current_refresh_id, "rid-1");
    assert_eq!(stored.access_version, 2);

    store.delete(&sid).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn revoke_preserves_the_record() {
    let store = RedisSessionStore::new(client().await);
    let sid = Uuid::new_v4().to_string();

    store.insert(session(&sid, "rid-0"), TTL).await.unwrap();
    store.revoke(&sid).await.unwrap();
    store.revoke(&sid).await.unwrap();

    let stored = store.find(&sid).await.unwrap().unwrap();
    assert!(!stored.is_active());

    store.delete(&sid).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn pending_secret_round_trip() {
    let store = RedisPendingSecretStore::new(client().await);
    let user_id = format!("user-{}", Uuid::new_v4());
    let setup = TwoFactorSetup::new("JBSWY3DP", "otpauth://totp/KeyGate:u?secret=JBSWY3DP");

    store.put(&user_id, &setup, TTL).await.unwrap();
    assert_eq!(store.get(&user_id).await.unwrap(), Some(setup));

    store.remove(&user_id).await.unwrap();
    assert!(store.get(&user_id).await.unwrap().is_none());
}
