use actix_web::{web, HttpResponse};

use crate::dto::LogoutResponse;
use crate::handlers::error::handle_core_error;
use crate::middleware::AuthContext;

use kg_core::repositories::credentials::CredentialVerifier;
use kg_core::repositories::session::SessionRepository;
use kg_core::repositories::two_factor::{PendingSecretStore, TwoFactorRepository};

use super::{removal_cookie, AppState};

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the caller's session. Idempotent: logging out twice succeeds.
/// The refresh cookie is cleared either way.
pub async fn logout<S, C, R, P>(
    context: AuthContext,
    state: web::Data<AppState<S, C, R, P>>,
) -> HttpResponse
where
    S: SessionRepository + 'static,
    C: CredentialVerifier + 'static,
    R: TwoFactorRepository + 'static,
    P: PendingSecretStore + 'static,
{
    match state.rotator.revoke_session(&context.session_id).await {
        Ok(()) => HttpResponse::Ok().cookie(removal_cookie()).json(LogoutResponse {
            message: "Logged out".to_string(),
        }),
        Err(err) => handle_core_error(err),
    }
}
