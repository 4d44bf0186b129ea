//! user_store - Local persistence of the current user record
//!
//! Holds the single `"user"` key mirrored from the remote session. The
//! store is namespaced per deployment so multiple app instances sharing
//! a data directory do not collide.

pub mod error;
pub mod store;

// Re-exports
pub use error::{Result, StoreError};
pub use store::{FileUserStore, UserStore};
