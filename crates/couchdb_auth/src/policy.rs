//! Role-based authorization guards.
//!
//! Pure guard functions with side-effecting notifications: each failure
//! mode publishes its event on the manager's bus so uninvolved observers
//! (a routing layer, an HTTP interceptor) can react without inspecting
//! the returned error.

use std::sync::Arc;

use auth_core::DecoratedUser;
use log::debug;
use user_store::UserStore;

use crate::bus::AuthEvent;
use crate::client_trait::SessionClient;
use crate::error::{AuthError, Result};
use crate::manager::SessionManager;

pub struct AuthorizationPolicy<C: SessionClient, S: UserStore> {
    manager: Arc<SessionManager<C, S>>,
}

impl<C, S> AuthorizationPolicy<C, S>
where
    C: SessionClient + 'static,
    S: UserStore + 'static,
{
    pub fn new(manager: Arc<SessionManager<C, S>>) -> Self {
        Self { manager }
    }

    /// Resolve the current user, or emit `unauthenticated` and fail.
    pub async fn require_authenticated_user(&self) -> Result<DecoratedUser> {
        match self.manager.get_current_user().await {
            Ok(user) => Ok(user),
            Err(err) => {
                debug!("authentication required: {err}");
                self.manager.trigger(AuthEvent::Unauthenticated).await;
                Err(AuthError::Unauthenticated)
            }
        }
    }

    /// Resolve the current user only if they hold the admin role.
    ///
    /// Present-but-not-admin emits `unauthorized` (which also clears the
    /// manager's local state); absent or errored emits `unauthenticated`.
    pub async fn require_admin_user(&self) -> Result<DecoratedUser> {
        match self.manager.get_current_user().await {
            Ok(user) if user.is_admin() => Ok(user),
            Ok(user) => {
                debug!("admin required, {} is not an admin", user.name());
                self.manager.trigger(AuthEvent::Unauthorized).await;
                Err(AuthError::Unauthorized)
            }
            Err(err) => {
                debug!("authentication required: {err}");
                self.manager.trigger(AuthEvent::Unauthenticated).await;
                Err(AuthError::Unauthenticated)
            }
        }
    }
}
