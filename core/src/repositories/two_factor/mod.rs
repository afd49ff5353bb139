pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::{MemoryPendingSecretStore, MemoryTwoFactorRepository};
pub use r#trait::{PendingSecretStore, TwoFactorRepository};

#[cfg(test)]
mod tests;
