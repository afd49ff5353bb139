//! MySQL repository implementations

pub mod two_factor_repository_impl;

pub use two_factor_repository_impl::MySqlTwoFactorRepository;
