//! JWKS client behavior against a local stub publisher.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use kg_core::errors::{CoreError, TokenError};
use kg_core::services::token::KeySource;
use kg_core::testutil::{test_jwks, TEST_KID};
use kg_infra::jwks::HttpJwksClient;

/// Minimal HTTP publisher serving one JWKS document, counting requests.
async fn spawn_publisher(body: String, hits: Arc<AtomicUsize>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(_) => return,
            };
            let body = body.clone();
            let hits = Arc::clone(&hits);

            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut read = 0;
                loop {
                    match socket.read(&mut buf[read..]).await {
                        Ok(0) => return,
                        Ok(n) => {
                            read += n;
                            if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                            if read == buf.len() {
                                return;
                            }
                        }
                        Err(_) => return,
                    }
                }

                hits.fetch_add(1, Ordering::SeqCst);
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn concurrent_misses_trigger_exactly_one_fetch() {
    let hits = Arc::new(AtomicUsize::new(0));
    let body = serde_json::to_string(&test_jwks()).unwrap();
    let base = spawn_publisher(body, Arc::clone(&hits)).await;

    let client = Arc::new(HttpJwksClient::with_ttl(&base, Duration::from_secs(3600)).unwrap());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        handles.push(tokio::spawn(
            async move { client.decoding_key(TEST_KID).await },
        ));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(hits.load(Ordering::SeqCst), 1, "cache misses stampeded the publisher");

    // Cache hit path performs no further fetches
    client.decoding_key(TEST_KID).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // Invalidation forces one more fetch
    client.invalidate().await;
    client.decoding_key(TEST_KID).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn remote_verifier_validates_issuer_tokens_offline() {
    use kg_core::services::token::TokenVerifier;
    use kg_core::testutil::test_issuer;

    let hits = Arc::new(AtomicUsize::new(0));
    let body = serde_json::to_string(&test_jwks()).unwrap();
    let base = spawn_publisher(body, Arc::clone(&hits)).await;

    // The verifying side never talks to the issuer, only to the published set
    let client = Arc::new(HttpJwksClient::new(&base).unwrap());
    let verifier = TokenVerifier::new(Arc::clone(&client));

    let issuer = test_issuer();
    let (token, _) = issuer.sign_access("user-9", "sess-9", 3).unwrap();

    let claims = verifier.verify_access(&token).await.unwrap();
    assert_eq!(claims.sub, "user-9");
    assert_eq!(claims.av, 3);

    // A second verification reuses the cached keys
    verifier.verify_access(&token).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_kid_from_published_set_is_key_not_found() {
    let hits = Arc::new(AtomicUsize::new(0));
    let body = serde_json::to_string(&test_jwks()).unwrap();
    let base = spawn_publisher(body, hits).await;

    let client = HttpJwksClient::new(&base).unwrap();

    let err = client.decoding_key("not-a-real-kid").await.err().unwrap();
    assert!(matches!(
        err,
        CoreError::Token(TokenError::KeyNotFound { .. })
    ));
}

#[tokio::test]
async fn unreachable_publisher_is_an_infrastructure_error() {
    // Nothing is listening on this port
    let client = HttpJwksClient::new("http://127.0.0.1:1").unwrap();

    let err = client.decoding_key(TEST_KID).await.err().unwrap();
    assert!(matches!(err, CoreError::Infrastructure { .. }));
}
