//! HTTP middleware.

pub mod auth;

pub use auth::{MaybePrincipal, auth_middleware};
