//! Tests for the two-factor lifecycle service

use chrono::Utc;

use crate::errors::{CoreError, TwoFactorError};
use crate::repositories::two_factor::{
    MemoryPendingSecretStore, MemoryTwoFactorRepository, PendingSecretStore, TwoFactorRepository,
};
use crate::services::two_factor::{totp, TwoFactorService};

type Service = TwoFactorService<MemoryTwoFactorRepository, MemoryPendingSecretStore>;

fn service() -> (Service, MemoryTwoFactorRepository, MemoryPendingSecretStore) {
    let records = MemoryTwoFactorRepository::new();
    let pending = MemoryPendingSecretStore::new();
    let service = TwoFactorService::new(records.clone(), pending.clone(), "KeyGate");
    (service, records, pending)
}

#[tokio::test]
async fn setup_generates_secret_and_url() {
    let (service, _, _) = service();

    let setup = service.setup("user-1").await.unwrap();

    assert!(!setup.secret.is_empty());
    assert!(setup.otp_url.starts_with("otpauth://totp/KeyGate:user-1"));
    assert!(setup.otp_url.contains(&setup.secret));
}

#[tokio::test]
async fn setup_is_idempotent_inside_the_window() {
    let (service, _, _) = service();

    let first = service.setup("user-1").await.unwrap();
    let second = service.setup("user-1").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn setup_after_enable_fails() {
    let (service, _, _) = service();

    let setup = service.setup("user-1").await.unwrap();
    let code = totp::code(&setup.secret, Utc::now()).unwrap();
    service.enable("user-1", &code).await.unwrap();

    let err = service.setup("user-1").await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::TwoFactor(TwoFactorError::AlreadyEnabled)
    ));
}

#[tokio::test]
async fn enable_commits_secret_and_consumes_pending_entry() {
    let (service, records, pending) = service();

    let setup = service.setup("user-1").await.unwrap();
    let code = totp::code(&setup.secret, Utc::now()).unwrap();
    service.enable("user-1", &code).await.unwrap();

    assert_eq!(
        records.committed_secret("user-1").await.unwrap(),
        Some(setup.secret)
    );
    assert!(pending.get("user-1").await.unwrap().is_none());
}

#[tokio::test]
async fn enable_without_pending_setup_is_expired() {
    let (service, _, _) = service();

    let err = service.enable("user-1", "123456").await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::TwoFactor(TwoFactorError::SetupExpired)
    ));
}

#[tokio::test]
async fn enable_with_wrong_code_keeps_pending_entry() {
    let (service, records, pending) = service();

    service.setup("user-1").await.unwrap();

    let err = service.enable("user-1", "000000").await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::TwoFactor(TwoFactorError::InvalidCode)
    ));

    assert!(records.committed_secret("user-1").await.unwrap().is_none());
    assert!(pending.get("user-1").await.unwrap().is_some());
}

#[tokio::test]
async fn verify_requires_enabled_factor() {
    let (service, _, _) = service();

    let err = service.verify("user-1", "123456").await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::TwoFactor(TwoFactorError::NotAvailable)
    ));
}

#[tokio::test]
async fn verify_accepts_current_code() {
    let (service, _, _) = service();

    let setup = service.setup("user-1").await.unwrap();
    let code = totp::code(&setup.secret, Utc::now()).unwrap();
    service.enable("user-1", &code).await.unwrap();

    service.verify("user-1", &code).await.unwrap();

    let err = service.verify("user-1", "000000").await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::TwoFactor(TwoFactorError::InvalidCode)
    ));
}

#[tokio::test]
async fn disable_requires_proof_of_possession() {
    let (service, records, _) = service();

    let setup = service.setup("user-1").await.unwrap();
    let code = totp::code(&setup.secret, Utc::now()).unwrap();
    service.enable("user-1", &code).await.unwrap();

    // Wrong code leaves the factor enabled
    let err = service.disable("user-1", "000000").await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::TwoFactor(TwoFactorError::InvalidCode)
    ));
    assert!(records.committed_secret("user-1").await.unwrap().is_some());

    service.disable("user-1", &code).await.unwrap();
    assert!(records.committed_secret("user-1").await.unwrap().is_none());

    // Disabled again means not available
    let err = service.disable("user-1", &code).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::TwoFactor(TwoFactorError::NotAvailable)
    ));
}
