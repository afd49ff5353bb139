//! Uniform error payload returned by every endpoint.

pub use kg_shared::types::response::ErrorResponse;
