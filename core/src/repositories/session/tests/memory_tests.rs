//! Tests for the in-memory session repository

use std::time::Duration;

use crate::domain::entities::session::{Session, SessionStatus};
use crate::domain::value_objects::ClientInfo;
use crate::repositories::session::{MemorySessionRepository, SessionRepository};

fn session(id: &str, refresh_id: &str) -> Session {
    Session::new(id, "user-1", refresh_id, &ClientInfo::new("127.0.0.1", "tests"))
}

const TTL: Duration = Duration::from_secs(60);

#[tokio::test]
async fn insert_then_find() {
    let repo = MemorySessionRepository::new();
    repo.insert(session("sess-1", "rid-0"), TTL).await.unwrap();

    let found = repo.find("sess-1").await.unwrap().unwrap();
    assert_eq!(found.current_refresh_id, "rid-0");
}

#[tokio::test]
async fn duplicate_insert_is_rejected() {
    let repo = MemorySessionRepository::new();
    repo.insert(session("sess-1", "rid-0"), TTL).await.unwrap();

    let result = repo.insert(session("sess-1", "rid-1"), TTL).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn expired_record_is_not_found() {
    let repo = MemorySessionRepository::new();
    repo.insert(session("sess-1", "rid-0"), Duration::from_millis(10))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(30)).await;

    assert!(repo.find("sess-1").await.unwrap().is_none());
}

#[tokio::test]
async fn conditional_update_succeeds_when_state_matches() {
    let repo = MemorySessionRepository::new();
    let first = session("sess-1", "rid-0");
    repo.insert(first.clone(), TTL).await.unwrap();

    let rotated = first.rotated("rid-1", &ClientInfo::new("127.0.0.1", "tests"));
    let won = repo
        .update_if_current("rid-0", 1, rotated, TTL)
        .await
        .unwrap();

    assert!(won);
    let stored = repo.find("sess-1").await.unwrap().unwrap();
    assert_eq!(stored.access_version, 2);
    assert_eq!(stored.previous_refresh_id, "rid-0");
}

#[tokio::test]
async fn conditional_update_loses_when_already_rotated() {
    let repo = MemorySessionRepository::new();
    let first = session("sess-1", "rid-0");
    repo.insert(first.clone(), TTL).await.unwrap();

    let client = ClientInfo::new("127.0.0.1", "tests");
    let winner = first.rotated("rid-1", &client);
    assert!(repo
        .update_if_current("rid-0", 1, winner, TTL)
        .await
        .unwrap());

    // Second writer still holds the pre-rotation read
    let loser = first.rotated("rid-2", &client);
    let won = repo.update_if_current("rid-0", 1, loser, TTL).await.unwrap();

    assert!(!won);
    let stored = repo.find("sess-1").await.unwrap().unwrap();
    assert_eq!(stored.current_refresh_id, "rid-1");
    assert_eq!(stored.access_version, 2);
}

#[tokio::test]
async fn revoke_is_idempotent_and_preserves_record() {
    let repo = MemorySessionRepository::new();
    repo.insert(session("sess-1", "rid-0"), TTL).await.unwrap();

    repo.revoke("sess-1").await.unwrap();
    repo.revoke("sess-1").await.unwrap();
    repo.revoke("absent").await.unwrap();

    let stored = repo.find("sess-1").await.unwrap().unwrap();
    assert_eq!(stored.status, SessionStatus::Revoked);
}

#[tokio::test]
async fn delete_removes_record() {
    let repo = MemorySessionRepository::new();
    repo.insert(session("sess-1", "rid-0"), TTL).await.unwrap();

    repo.delete("sess-1").await.unwrap();

    assert!(repo.find("sess-1").await.unwrap().is_none());
}
