//! # Infrastructure Layer
//!
//! Concrete implementations of the core repository and key-source traits:
//!
//! - **Cache**: Redis-backed session store and pending two-factor store
//! - **JWKS**: HTTP client fetching and caching the issuer's published keys
//! - **Database**: MySQL implementation of the committed two-factor secrets

/// Cache module - Redis client and stores
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// JWKS module - remote key distribution client
pub mod jwks;

pub use cache::{RedisClient, RedisPendingSecretStore, RedisSessionStore};
pub use database::MySqlTwoFactorRepository;
pub use jwks::HttpJwksClient;
