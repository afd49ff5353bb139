//! Shared utilities and common types for the KeyGate services
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types
//! - The uniform error payload structure

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{CacheConfig, Environment, ServerConfig, TokenSettings};
pub use types::ErrorResponse;
