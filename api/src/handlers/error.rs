//! Mapping from domain errors to HTTP responses.
//!
//! Status mapping: 401 for token/session/credential failures, 400 for
//! malformed input, 409 for conflicting second-factor state, 503 for
//! infrastructure outages. Outages must stay distinguishable from
//! authentication failures so clients do not mistake one for a bad password.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::{error, warn};

use crate::dto::ErrorResponse;
use kg_core::errors::{CoreError, TwoFactorError};

/// Resolve a domain error to its status code and uniform payload.
pub fn error_payload(err: &CoreError) -> (StatusCode, ErrorResponse) {
    let code = err.error_code();

    match err {
        CoreError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(code, message.clone()),
        ),

        CoreError::Auth(_)
        | CoreError::Token(_)
        | CoreError::Session(_)
        | CoreError::TwoFactor(TwoFactorError::InvalidCode) => {
            warn!("authentication failure: {}", err);
            (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(code, err.to_string()),
            )
        }

        CoreError::TwoFactor(_) => (
            StatusCode::CONFLICT,
            ErrorResponse::new(code, err.to_string()),
        ),

        CoreError::Configuration { .. } => {
            error!("configuration error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(code, "Service misconfigured"),
            )
        }

        CoreError::Infrastructure { .. } => {
            error!("infrastructure error: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new(code, "Service temporarily unavailable"),
            )
        }
    }
}

/// Convert a domain error into the uniform `{code, message}` response.
pub fn handle_core_error(err: CoreError) -> HttpResponse {
    let (status, payload) = error_payload(&err);
    HttpResponse::build(status).json(payload)
}

/// Response for malformed request bodies caught by DTO validation.
pub fn validation_failed(detail: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("VALIDATION_ERROR", detail))
}

/// Domain error carried through actix's error plumbing (middleware and
/// extractors), rendering the same payload as [`handle_core_error`].
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        error_payload(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, payload) = error_payload(&self.0);
        HttpResponse::build(status).json(payload)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}
