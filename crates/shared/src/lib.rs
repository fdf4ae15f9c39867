//! Shared types, errors, and configuration for Rollcall.
//!
//! This crate provides common types used across all other crates:
//! - Typed identifiers for employees and attendance entries
//! - The identity gate that verifies bearer credentials
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Principal;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{AuthError, IdentityGate};
pub use types::{EmployeeId, EntryId, IdParseError};
