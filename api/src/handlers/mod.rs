pub mod error;

pub use error::handle_core_error;
