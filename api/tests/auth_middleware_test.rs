//! Middleware behavior: verification plus the session liveness read.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};

use kg_api::app::configure_app;
use kg_api::middleware::{auth::AuthGate, Authenticator};
use kg_api::routes::AppState;

use kg_core::domain::value_objects::ClientInfo;
use kg_core::repositories::credentials::MockCredentialVerifier;
use kg_core::repositories::session::MemorySessionRepository;
use kg_core::repositories::two_factor::{MemoryPendingSecretStore, MemoryTwoFactorRepository};
use kg_core::services::session::SessionRotator;
use kg_core::services::token::{KeyRing, TokenConfig, TokenIssuer, TokenVerifier};
use kg_core::services::two_factor::TwoFactorService;
use kg_core::testutil::{test_key_set, TEST_REFRESH_SECRET};

struct TestHarness {
    state: web::Data<
        AppState<
            MemorySessionRepository,
            MockCredentialVerifier,
            MemoryTwoFactorRepository,
            MemoryPendingSecretStore,
        >,
    >,
    auth_gate: web::Data<Arc<dyn AuthGate>>,
    key_ring: web::Data<Arc<KeyRing>>,
}

fn harness() -> TestHarness {
    let key_ring = Arc::new(KeyRing::new(test_key_set()));
    let issuer = Arc::new(
        TokenIssuer::new(Arc::clone(&key_ring), TokenConfig::new(TEST_REFRESH_SECRET)).unwrap(),
    );

    let store = MemorySessionRepository::new();
    let rotator = Arc::new(SessionRotator::new(store, Arc::clone(&issuer)));

    let verifier = Arc::new(TokenVerifier::new(Arc::clone(&key_ring)));
    let auth_gate: Arc<dyn AuthGate> =
        Arc::new(Authenticator::new(verifier, Arc::clone(&rotator)));

    let two_factor = Arc::new(TwoFactorService::new(
        MemoryTwoFactorRepository::new(),
        MemoryPendingSecretStore::new(),
        "KeyGate",
    ));

    TestHarness {
        state: web::Data::new(AppState {
            rotator,
            issuer,
            credentials: Arc::new(MockCredentialVerifier::new()),
            two_factor,
        }),
        auth_gate: web::Data::new(auth_gate),
        key_ring: web::Data::new(key_ring),
    }
}

fn client() -> ClientInfo {
    ClientInfo::new("127.0.0.1", "middleware-tests")
}

#[actix_web::test]
async fn missing_token_is_unauthorized() {
    let h = harness();
    let app = test::init_service(
        actix_web::App::new().configure(configure_app(h.state, h.auth_gate, h.key_ring)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn garbage_token_is_unauthorized() {
    let h = harness();
    let app = test::init_service(
        actix_web::App::new().configure(configure_app(h.state, h.auth_gate, h.key_ring)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn live_session_token_passes_the_guard() {
    let h = harness();
    let pair = h
        .state
        .rotator
        .issue_initial_tokens("user-1", &client())
        .await
        .unwrap();

    let app = test::init_service(
        actix_web::App::new().configure(configure_app(h.state, h.auth_gate, h.key_ring)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn revoked_session_fails_liveness_inside_token_expiry() {
    let h = harness();
    let pair = h
        .state
        .rotator
        .issue_initial_tokens("user-1", &client())
        .await
        .unwrap();

    let claims = h.state.issuer.verify_refresh(&pair.refresh_token).unwrap();
    h.state.rotator.revoke_session(&claims.sid).await.unwrap();

    let app = test::init_service(
        actix_web::App::new().configure(configure_app(h.state, h.auth_gate, h.key_ring)),
    )
    .await;

    // The token signature is still valid; only the liveness check rejects it
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "SESSION_INVALID");
}

#[actix_web::test]
async fn rotation_invalidates_older_access_tokens() {
    let h = harness();
    let pair = h
        .state
        .rotator
        .issue_initial_tokens("user-1", &client())
        .await
        .unwrap();

    let claims = h.state.issuer.verify_refresh(&pair.refresh_token).unwrap();
    h.state
        .rotator
        .rotate_on_refresh(&claims, &client())
        .await
        .unwrap();

    let app = test::init_service(
        actix_web::App::new().configure(configure_app(h.state, h.auth_gate, h.key_ring)),
    )
    .await;

    // av=1 token against an av=2 session record
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn jwks_endpoint_is_public_and_cacheable() {
    let h = harness();
    let app = test::init_service(
        actix_web::App::new().configure(configure_app(h.state, h.auth_gate, h.key_ring)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/.well-known/jwks.json")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("cache-control").unwrap(),
        "public, max-age=3600"
    );

    let body: serde_json::Value = test::read_body_json(res).await;
    let keys = body["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0]["kty"], "OKP");
    assert_eq!(keys[0]["crv"], "Ed25519");
    assert_eq!(keys[0]["use"], "sig");
}
