//! # couchdb_auth
//!
//! Client-side session and authentication manager for a CouchDB-style
//! backend. Establishes and destroys the remote session, mirrors the
//! signed-in user into local storage, resolves the current user
//! (memory first, storage second, remote session as a liveness probe),
//! and publishes state changes on an isolated event bus that the
//! authorization guards also report to.

pub mod bus;
pub mod client_trait;
pub mod error;
pub mod manager;
pub mod policy;
pub mod session;

// Re-exports
pub use bus::{AuthEvent, AuthStateBus};
pub use client_trait::SessionClient;
pub use error::{AuthError, Result};
pub use manager::{Credentials, SessionManager};
pub use policy::AuthorizationPolicy;
pub use session::{
    RemoteSessionClient, ResetPasswordOptions, SessionCreationResponse, SessionInfo, UserContext,
};

// Re-export the shared core types for convenience
pub use auth_core::{AuthConfig, DecoratedUser, InterceptorConfig, User, ADMIN_ROLE};
pub use user_store::{FileUserStore, UserStore};
