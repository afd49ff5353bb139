//! Per-request authentication middleware.
//!
//! Composes offline token verification with the session liveness read: the
//! signature check alone cannot see logout or rotation, so every protected
//! request also confirms the session record is alive at the token's access
//! version. On success a typed [`AuthContext`] is injected into request
//! extensions.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::error::ApiError;
use kg_core::errors::{CoreError, SessionError, TokenError};
use kg_core::repositories::session::SessionRepository;
use kg_core::services::session::SessionRotator;
use kg_core::services::token::{KeySource, TokenVerifier};

/// Authenticated request identity extracted from a verified token and a live
/// session record.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub session_id: String,
    pub access_version: u64,
}

/// Verification + liveness behind one object-safe call, so the middleware
/// does not carry the store and key-source generics.
#[async_trait]
pub trait AuthGate: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<AuthContext, CoreError>;
}

/// Production gate over the token verifier and session rotator.
pub struct Authenticator<S: SessionRepository, K: KeySource> {
    verifier: Arc<TokenVerifier<K>>,
    rotator: Arc<SessionRotator<S>>,
}

impl<S: SessionRepository, K: KeySource> Authenticator<S, K> {
    pub fn new(verifier: Arc<TokenVerifier<K>>, rotator: Arc<SessionRotator<S>>) -> Self {
        Self { verifier, rotator }
    }
}

#[async_trait]
impl<S: SessionRepository, K: KeySource> AuthGate for Authenticator<S, K> {
    async fn authenticate(&self, token: &str) -> Result<AuthContext, CoreError> {
        let claims = self.verifier.verify_access(token).await?;

        // The signed token stays cryptographically valid until its own
        // expiry; the liveness read is what makes logout and rotation take
        // effect sooner than that.
        if !self.rotator.is_live(&claims.sid, claims.av).await? {
            return Err(SessionError::Invalid.into());
        }

        Ok(AuthContext {
            user_id: claims.sub,
            session_id: claims.sid,
            access_version: claims.av,
        })
    }
}

/// Middleware factory guarding protected routes.
pub struct RequireAuth;

impl RequireAuth {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RequireAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Middleware service performing the actual checks.
pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = extract_bearer_token(&req)
                .ok_or_else(|| ApiError::from(CoreError::from(TokenError::Invalid)))?;

            let gate = req
                .app_data::<web::Data<Arc<dyn AuthGate>>>()
                .ok_or_else(|| {
                    ApiError::from(CoreError::configuration("auth gate not configured"))
                })?;

            let context = gate
                .authenticate(&token)
                .await
                .map_err(ApiError::from)?;

            req.extensions_mut().insert(context);

            service.call(req).await
        })
    }
}

/// Extracts Bearer token from the Authorization header.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for handlers behind [`RequireAuth`].
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(CoreError::from(TokenError::Invalid)).into());

        ready(result)
    }
}
