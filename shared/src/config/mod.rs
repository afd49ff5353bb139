//! Configuration module with business-specific sub-modules
//!
//! - `token` - Token signing, TTLs, and key material locations
//! - `cache` - Redis connection settings for session and 2FA storage
//! - `environment` - Environment detection
//! - `server` - HTTP server settings

pub mod cache;
pub mod environment;
pub mod server;
pub mod token;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use environment::Environment;
pub use server::ServerConfig;
pub use token::TokenSettings;
