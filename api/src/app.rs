//! Application factory wiring routes, middleware, and shared state.

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::middleware::{auth::AuthGate, RequireAuth};
use crate::routes::auth::{login::login, logout::logout, refresh::refresh, AppState};
use crate::routes::{jwks, two_factor};

use kg_core::repositories::credentials::CredentialVerifier;
use kg_core::repositories::session::SessionRepository;
use kg_core::repositories::two_factor::{PendingSecretStore, TwoFactorRepository};
use kg_core::services::token::KeyRing;

/// Registers state, routes, and the per-route auth guard.
///
/// Use with `App::new().configure(...)`; outer middleware (CORS, request
/// tracing) is applied by the caller.
pub fn configure_app<S, C, R, P>(
    app_state: web::Data<AppState<S, C, R, P>>,
    auth_gate: web::Data<Arc<dyn AuthGate>>,
    key_ring: web::Data<Arc<KeyRing>>,
) -> impl FnOnce(&mut web::ServiceConfig)
where
    S: SessionRepository + 'static,
    C: CredentialVerifier + 'static,
    R: TwoFactorRepository + 'static,
    P: PendingSecretStore + 'static,
{
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(app_state)
            .app_data(auth_gate)
            .app_data(key_ring)
            // Health check endpoint
            .route("/health", web::get().to(health_check))
            // Public key distribution
            .route("/.well-known/jwks.json", web::get().to(jwks::jwks_document))
            // API v1 routes
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/login", web::post().to(login::<S, C, R, P>))
                            .route("/refresh", web::post().to(refresh::<S, C, R, P>))
                            .route(
                                "/logout",
                                web::post().to(logout::<S, C, R, P>).wrap(RequireAuth::new()),
                            ),
                    )
                    .service(
                        web::scope("/2fa")
                            .route(
                                "/setup",
                                web::post()
                                    .to(two_factor::setup::<S, C, R, P>)
                                    .wrap(RequireAuth::new()),
                            )
                            .route(
                                "/enable",
                                web::post()
                                    .to(two_factor::enable::<S, C, R, P>)
                                    .wrap(RequireAuth::new()),
                            )
                            .route(
                                "/verify",
                                web::post()
                                    .to(two_factor::verify::<S, C, R, P>)
                                    .wrap(RequireAuth::new()),
                            )
                            .route(
                                "/disable",
                                web::post()
                                    .to(two_factor::disable::<S, C, R, P>)
                                    .wrap(RequireAuth::new()),
                            ),
                    ),
            )
            // Default 404 handler
            .default_service(web::route().to(not_found));
    }
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "keygate-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(kg_shared::types::response::ErrorResponse::new(
        "NOT_FOUND",
        "Resource not found",
    ))
}
