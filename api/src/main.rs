//! KeyGate issuer service binary.

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kg_api::app::configure_app;
use kg_api::config::Config;
use kg_api::middleware::{auth::AuthGate, create_cors, Authenticator};
use kg_api::routes::AppState;

use kg_core::repositories::credentials::MockCredentialVerifier;
use kg_core::services::session::SessionRotator;
use kg_core::services::token::{KeyRing, SigningKeySet, TokenConfig, TokenIssuer, TokenVerifier};
use kg_core::services::two_factor::TwoFactorService;

use kg_infra::cache::{RedisClient, RedisPendingSecretStore, RedisSessionStore};
use kg_infra::database::MySqlTwoFactorRepository;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    info!(environment = %config.environment, "starting KeyGate issuer");

    if !config.token.is_complete() {
        anyhow::bail!("TOKEN_REFRESH_SECRET and TOKEN_ACCESS_KID must be set");
    }

    // Key material is generated and published out-of-band; the service only
    // loads it.
    let key_set = SigningKeySet::from_files(
        config.token.kid.as_str(),
        &config.token.private_key_path,
        &config.token.jwks_path,
    )?;
    let key_ring = Arc::new(KeyRing::new(key_set));

    let token_config = TokenConfig {
        refresh_secret: config.token.refresh_secret.clone(),
        access_ttl_secs: config.token.access_ttl_secs as i64,
        refresh_ttl_secs: config.token.refresh_ttl_secs as i64,
    };
    let issuer = Arc::new(TokenIssuer::new(Arc::clone(&key_ring), token_config)?);

    let redis = RedisClient::new(config.cache.clone()).await?;
    if !redis.health_check().await? {
        anyhow::bail!("Redis did not answer the startup ping");
    }
    let session_store = RedisSessionStore::new(redis.clone());
    let rotator = Arc::new(SessionRotator::new(session_store, Arc::clone(&issuer)));

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db_pool = MySqlPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .context("failed to connect to MySQL")?;

    let two_factor = Arc::new(TwoFactorService::new(
        MySqlTwoFactorRepository::new(db_pool),
        RedisPendingSecretStore::new(redis),
        config.two_factor_issuer.clone(),
    ));

    // Credential verification belongs to the external user service; until
    // that client is wired in, accounts registered through the in-memory
    // verifier are accepted.
    let credentials = Arc::new(MockCredentialVerifier::new());

    let verifier = Arc::new(TokenVerifier::new(Arc::clone(&key_ring)));
    let auth_gate: Arc<dyn AuthGate> =
        Arc::new(Authenticator::new(verifier, Arc::clone(&rotator)));

    let state = web::Data::new(AppState {
        rotator,
        issuer,
        credentials,
        two_factor,
    });
    let auth_gate = web::Data::new(auth_gate);
    let key_ring_data = web::Data::new(key_ring);

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "binding HTTP server");

    HttpServer::new(move || {
        actix_web::App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(create_cors())
            .configure(configure_app(
                state.clone(),
                auth_gate.clone(),
                key_ring_data.clone(),
            ))
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
