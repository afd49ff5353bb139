use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::LoginRequest;
use crate::handlers::error::{handle_core_error, validation_failed};

use kg_core::errors::AuthError;
use kg_core::repositories::credentials::CredentialVerifier;
use kg_core::repositories::session::SessionRepository;
use kg_core::repositories::two_factor::{PendingSecretStore, TwoFactorRepository};

use super::{client_info, token_response, AppState};

/// Handler for POST /api/v1/auth/login
///
/// Checks credentials against the external user store, enforces the TOTP
/// gate when the account has it enabled, and issues the initial token pair.
///
/// # Errors
/// - 401 `INVALID_CREDENTIALS`: unknown account or wrong password
/// - 401 `TWO_FACTOR_REQUIRED`: account has 2FA enabled and no code was sent
/// - 401 `INVALID_CODE`: the provided TOTP code did not verify
/// - 503 `INFRASTRUCTURE_ERROR`: session store unavailable
pub async fn login<S, C, R, P>(
    req: HttpRequest,
    state: web::Data<AppState<S, C, R, P>>,
    body: web::Json<LoginRequest>,
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

    let client = client_info(&req);

    let principal = match state.credentials.verify(&body.email, &body.password).await {
        Ok(Some(principal)) => principal,
        Ok(None) => return handle_core_error(AuthError::InvalidCredentials.into()),
        Err(err) => return handle_core_error(err),
    };

    match state.two_factor.is_enabled(&principal.user_id).await {
        Ok(true) => {
            let code = body.totp_code.as_deref().unwrap_or_default();
            if code.is_empty() {
                return handle_core_error(AuthError::TwoFactorRequired.into());
            }
            if let Err(err) = state.two_factor.verify(&principal.user_id, code).await {
                return handle_core_error(err);
            }
        }
        Ok(false) => {}
        Err(err) => return handle_core_error(err),
    }

    match state
        .rotator
        .issue_initial_tokens(&principal.user_id, &client)
        .await
    {
        Ok(pair) => token_response(pair),
        Err(err) => handle_core_error(err),
    }
}
