//! Remote key distribution.
//!
//! Verifying services fetch the issuer's published keys once per cache TTL
//! instead of calling the issuer per request, keeping the verification path
//! available through issuer outages.

pub mod client;

pub use client::HttpJwksClient;
