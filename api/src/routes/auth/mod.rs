//! Authentication route handlers: login, refresh, logout.

pub mod login;
pub mod logout;
pub mod refresh;

use std::sync::Arc;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};

use crate::dto::TokenResponse;
use kg_core::domain::entities::token::TokenPair;
use kg_core::domain::value_objects::ClientInfo;
use kg_core::repositories::credentials::CredentialVerifier;
use kg_core::repositories::session::SessionRepository;
use kg_core::repositories::two_factor::{PendingSecretStore, TwoFactorRepository};
use kg_core::services::session::SessionRotator;
use kg_core::services::token::TokenIssuer;
use kg_core::services::two_factor::TwoFactorService;

/// Cookie carrying the refresh token, scoped to the auth API path
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Path scope of the refresh cookie
pub const AUTH_PATH: &str = "/api/v1/auth";

/// Application state holding the shared services.
pub struct AppState<S, C, R, P>
where
    S: SessionRepository,
    C: CredentialVerifier,
    R: TwoFactorRepository,
    P: PendingSecretStore,
{
    pub rotator: Arc<SessionRotator<S>>,
    pub issuer: Arc<TokenIssuer>,
    pub credentials: Arc<C>,
    pub two_factor: Arc<TwoFactorService<R, P>>,
}

/// Caller provenance from explicit request metadata.
///
/// `X-Forwarded-For` wins over the peer address so internal hops do not
/// overwrite the original client on the session record.
pub fn client_info(req: &HttpRequest) -> ClientInfo {
    let ip = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_default();

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    ClientInfo::new(ip, user_agent)
}

/// Token-pair response with the refresh token doubled as an HTTP-only
/// cookie for browser clients.
pub(crate) fn token_response(pair: TokenPair) -> HttpResponse {
    let cookie = Cookie::build(REFRESH_COOKIE, pair.refresh_token.clone())
        .path(AUTH_PATH)
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(CookieDuration::seconds(pair.refresh_expires_in))
        .finish();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(TokenResponse::from(pair))
}

/// Expired cookie clearing the refresh token on logout.
pub(crate) fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(REFRESH_COOKIE, "")
        .path(AUTH_PATH)
        .http_only(true)
        .same_site(SameSite::Strict)
        .finish();
    cookie.make_removal();
    cookie
}
