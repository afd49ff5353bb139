//! HTTP JWKS client with a TTL cache and single-flighted refresh.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::DecodingKey;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use kg_core::errors::CoreError;
use kg_core::services::token::{Jwks, KeySource};

/// Well-known path serving the published key set
const JWKS_PATH: &str = "/.well-known/jwks.json";

/// Default cache lifetime for a fetched key set
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Default timeout for the fetch itself
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

struct CachedJwks {
    jwks: Jwks,
    fetched_at: Instant,
}

/// Fetches and caches the issuer's published key set.
///
/// Reads are lock-free for cache hits. Cache population is single-flighted:
/// concurrent misses take one flight lock, re-check the cache, and only the
/// first caller performs the network fetch; the rest reuse its result rather
/// than stampeding the publisher.
pub struct HttpJwksClient {
    endpoint: String,
    http: reqwest::Client,
    ttl: Duration,
    cache: RwLock<Option<CachedJwks>>,
    flight: Mutex<()>,
}

impl HttpJwksClient {
    /// Client against the issuer's base URL with the default one-hour TTL.
    pub fn new(issuer_base_url: &str) -> Result<Self, CoreError> {
        Self::with_ttl(issuer_base_url, DEFAULT_CACHE_TTL)
    }

    /// Client with a custom cache TTL.
    pub fn with_ttl(issuer_base_url: &str, ttl: Duration) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| CoreError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: format!("{}{JWKS_PATH}", issuer_base_url.trim_end_matches('/')),
            http,
            ttl,
            cache: RwLock::new(None),
            flight: Mutex::new(()),
        })
    }

    /// The current key set, from cache or a fresh fetch.
    pub async fn jwks(&self) -> Result<Jwks, CoreError> {
        if let Some(jwks) = self.cached().await {
            return Ok(jwks);
        }

        // Single flight: whoever holds the lock fetches; everyone queued
        // behind it finds the cache already repopulated.
        let _flight = self.flight.lock().await;
        if let Some(jwks) = self.cached().await {
            debug!("JWKS refreshed by concurrent caller");
            return Ok(jwks);
        }

        let jwks = self.fetch().await?;
        let mut cache = self.cache.write().await;
        *cache = Some(CachedJwks {
            jwks: jwks.clone(),
            fetched_at: Instant::now(),
        });

        Ok(jwks)
    }

    /// Drop the cached set, forcing a fetch on the next lookup.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        *cache = None;
    }

    async fn cached(&self) -> Option<Jwks> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|c| c.fetched_at.elapsed() < self.ttl)
            .map(|c| c.jwks.clone())
    }

    async fn fetch(&self) -> Result<Jwks, CoreError> {
        debug!(endpoint = %self.endpoint, "fetching JWKS");

        let response = self.http.get(&self.endpoint).send().await.map_err(|e| {
            warn!("JWKS fetch failed: {}", e);
            CoreError::infrastructure(format!("JWKS fetch failed: {e}"))
        })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "JWKS endpoint returned an error");
            return Err(CoreError::infrastructure(format!(
                "JWKS endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CoreError::infrastructure(format!("failed to read JWKS body: {e}")))?;

        let jwks = Jwks::from_json(&body)?;
        info!(keys = jwks.keys.len(), "JWKS fetched");
        Ok(jwks)
    }
}

#[async_trait]
impl KeySource for HttpJwksClient {
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, CoreError> {
        self.jwks().await?.decoding_key(kid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_well_known_path() {
        let client = HttpJwksClient::new("http://issuer.internal:8080/").unwrap();
        assert_eq!(
            client.endpoint,
            "http://issuer.internal:8080/.well-known/jwks.json"
        );
    }
}
