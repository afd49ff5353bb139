pub mod auth;
pub mod cors;

pub use auth::{AuthContext, AuthGate, Authenticator, RequireAuth};
pub use cors::create_cors;
