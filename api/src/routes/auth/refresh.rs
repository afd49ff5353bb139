use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::RefreshRequest;
use crate::handlers::error::handle_core_error;

use kg_core::errors::CoreError;
use kg_core::repositories::credentials::CredentialVerifier;
use kg_core::repositories::session::SessionRepository;
use kg_core::repositories::two_factor::{PendingSecretStore, TwoFactorRepository};

use super::{client_info, token_response, AppState, REFRESH_COOKIE};

/// Handler for POST /api/v1/auth/refresh
///
/// Accepts the refresh token from the request body or the HTTP-only cookie,
/// verifies it, and rotates the session. Reuse of an already-rotated-out
/// token revokes the session and fails with `SESSION_REPLAY_DETECTED`.
///
/// # Errors
/// - 400 `VALIDATION_ERROR`: no refresh token supplied
/// - 401 `TOKEN_EXPIRED` / `TOKEN_INVALID`: the token itself failed
/// - 401 `SESSION_NOT_FOUND` / `SESSION_REVOKED` / `SESSION_REPLAY_DETECTED`
///   / `SESSION_INVALID`: the session state refused the rotation
pub async fn refresh<S, C, R, P>(
    req: HttpRequest,
    state: web::Data<AppState<S, C, R, P>>,
    body: Option<web::Json<RefreshRequest>>,
) -> HttpResponse
where
    S: SessionRepository + 'static,
    C: CredentialVerifier + 'static,
    R: TwoFactorRepository + 'static,
    P: PendingSecretStore + 'static,
{
    let token = body
        .as_ref()
        .and_then(|b| b.refresh_token.clone())
        .or_else(|| req.cookie(REFRESH_COOKIE).map(|c| c.value().to_string()));

    let token = match token {
        Some(token) if !token.is_empty() => token,
        _ => {
            return handle_core_error(CoreError::Validation {
                message: "refresh token is required".to_string(),
            })
        }
    };

    let claims = match state.issuer.verify_refresh(&token) {
        Ok(claims) => claims,
        Err(err) => return handle_core_error(err),
    };

    let client = client_info(&req);

    match state.rotator.rotate_on_refresh(&claims, &client).await {
        Ok(pair) => token_response(pair),
        Err(err) => handle_core_error(err),
    }
}
