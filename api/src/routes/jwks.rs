//! Publisher endpoint for the verification key set.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{web, HttpResponse};

use crate::handlers::error::handle_core_error;
use kg_core::services::token::KeyRing;

/// Handler for GET /.well-known/jwks.json
///
/// Serves the published public keys (active + recently retired) so other
/// services can verify access tokens without calling back per request. The
/// response is publicly cacheable; verifiers refresh on their own TTL.
pub async fn jwks_document(ring: web::Data<Arc<KeyRing>>) -> HttpResponse {
    match ring.published() {
        Ok(jwks) => HttpResponse::Ok()
            .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
            .json(jwks),
        Err(err) => handle_core_error(err),
    }
}
