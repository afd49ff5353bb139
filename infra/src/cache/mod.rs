//! Cache module for Redis-backed storage
//!
//! Provides the Redis client plus the session and pending two-factor stores
//! built on top of it. All operations run under a bounded timeout and surface
//! outages as `INFRASTRUCTURE_ERROR` so callers can tell an outage apart from
//! an authentication failure.

pub mod redis_client;
pub mod session_store;
pub mod two_factor_store;

pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;
pub use two_factor_store::RedisPendingSecretStore;

// Re-export commonly used types
pub use kg_shared::config::cache::CacheConfig;
