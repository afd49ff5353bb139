pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::MemorySessionRepository;
pub use r#trait::SessionRepository;

#[cfg(test)]
mod tests;
