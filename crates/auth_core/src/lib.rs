//! auth_core - Core types for the couchdb-auth crates
//!
//! This crate provides the types shared across the auth crates:
//! - `user` - the plain `User` record and its `DecoratedUser` read view
//! - `config` - `AuthConfig`, the recognized configuration surface

pub mod config;
pub mod user;

// Re-export commonly used types
pub use config::{AuthConfig, InterceptorConfig};
pub use user::{DecoratedUser, User, ADMIN_ROLE};
