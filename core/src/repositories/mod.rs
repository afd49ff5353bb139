//! Repository interfaces owned by the domain layer.
//!
//! Each submodule defines one capability trait with a single production
//! implementation (in the infra crate) and an in-memory implementation used
//! by tests.

pub mod credentials;
pub mod session;
pub mod two_factor;

pub use credentials::{CredentialVerifier, MockCredentialVerifier, Principal};
pub use session::{MemorySessionRepository, SessionRepository};
pub use two_factor::{
    MemoryPendingSecretStore, MemoryTwoFactorRepository, PendingSecretStore, TwoFactorRepository,
};
