//! Two-factor route handlers under /api/v1/2fa. All are auth-guarded.

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::dto::{TwoFactorCodeRequest, TwoFactorSetupResponse};
use crate::handlers::error::{handle_core_error, validation_failed};
use crate::middleware::AuthContext;
use crate::routes::auth::AppState;

use kg_core::repositories::credentials::CredentialVerifier;
use kg_core::repositories::session::SessionRepository;
use kg_core::repositories::two_factor::{PendingSecretStore, TwoFactorRepository};

/// Handler for POST /api/v1/2fa/setup
///
/// Starts (or resumes) second-factor enrollment. Retrying inside the setup
/// window returns the same secret; an enabled account gets 409
/// `TWO_FACTOR_ENABLED`.
pub async fn setup<S, C, R, P>(
    context: AuthContext,
    state: web::Data<AppState<S, C, R, P>>,
) -> HttpResponse
where
    S: SessionRepository + 'static,
    C: CredentialVerifier + 'static,
    R: TwoFactorRepository + 'static,
    P: PendingSecretStore + 'static,
{
    match state.two_factor.setup(&context.user_id).await {
        Ok(pending) => HttpResponse::Ok().json(TwoFactorSetupResponse::from(pending)),
        Err(err) => handle_core_error(err),
    }
}

/// Handler for POST /api/v1/2fa/enable
///
/// Confirms enrollment with a code from the authenticator app; the pending
/// secret is committed and its cache entry consumed.
pub async fn enable<S, C, R, P>(
    context: AuthContext,
    state: web::Data<AppState<S, C, R, P>>,
    body: web::Json<TwoFactorCodeRequest>,
) -> HttpResponse
where
    S: SessionRepository + 'static,
    C: CredentialVerifier + 'static,
    R: TwoFactorRepository + 'static,
    P: PendingSecretStore + 'static,
{
    if let Err(errors) = body.validate() {
        return validation_failed(errors.to_string());
    }

    match state.two_factor.enable(&context.user_id, &body.code).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Two-factor enabled" })),
        Err(err) => handle_core_error(err),
    }
}

/// Handler for POST /api/v1/2fa/verify
pub async fn verify<S, C, R, P>(
    context: AuthContext,
    state: web::Data<AppState<S, C, R, P>>,
    body: web::Json<TwoFactorCodeRequest>,
) -> HttpResponse
where
    S: SessionRepository + 'static,
    C: CredentialVerifier + 'static,
    R: TwoFactorRepository + 'static,
    P: PendingSecretStore + 'static,
{
    if let Err(errors) = body.validate() {
        return validation_failed(errors.to_string());
    }

    match state.two_factor.verify(&context.user_id, &body.code).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Code accepted" })),
        Err(err) => handle_core_error(err),
    }
}

/// Handler for POST /api/v1/2fa/disable
///
/// Requires a valid current code as proof of possession before clearing the
/// committed secret.
pub async fn disable<S, C, R, P>(
    context: AuthContext,
    state: web::Data<AppState<S, C, R, P>>,
    body: web::Json<TwoFactorCodeRequest>,
) -> HttpResponse
where
    S: SessionRepository + 'static,
    C: CredentialVerifier + 'static,
    R: TwoFactorRepository + 'static,
    P: PendingSecretStore + 'static,
{
    if let Err(errors) = body.validate() {
        return validation_failed(errors.to_string());
    }

    match state.two_factor.disable(&context.user_id, &body.code).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Two-factor disabled" })),
        Err(err) => handle_core_error(err),
    }
}
