//! Session manager service: the session-state reconciliation core.

use std::future::Future;
use std::sync::Arc;

use auth_core::{DecoratedUser, User};
use log::{error, info, warn};
use tokio::sync::RwLock;
use user_store::UserStore;

use crate::bus::{AuthEvent, AuthStateBus};
use crate::client_trait::SessionClient;
use crate::error::{AuthError, Result};
use crate::session::models::{ResetPasswordOptions, SessionInfo};

/// Sign-in credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Orchestrates the remote session, the local user store, and the
/// in-memory current-user cache, publishing transitions on its own
/// [`AuthStateBus`].
///
/// Each manager instance owns its state outright; two instances share
/// nothing. Overlapping `sign_in`/`sign_out`/`get_current_user` calls
/// from separate tasks are not serialized against each other: the last
/// write to the cached user wins.
pub struct SessionManager<C: SessionClient, S: UserStore> {
    client: Arc<C>,
    store: Arc<S>,
    bus: Arc<AuthStateBus>,
    current_user: Arc<RwLock<Option<User>>>,
}

impl<C, S> SessionManager<C, S>
where
    C: SessionClient + 'static,
    S: UserStore + 'static,
{
    /// Create a new SessionManager over a session client and user store.
    pub async fn new(client: C, store: S) -> Self {
        let client = Arc::new(client);
        let store = Arc::new(store);
        let bus = Arc::new(AuthStateBus::new());
        let current_user: Arc<RwLock<Option<User>>> = Arc::new(RwLock::new(None));

        // An `unauthorized` event forces a local sign-out without
        // another remote round trip; the remote session is left alone.
        {
            let current_user = Arc::clone(&current_user);
            let store = Arc::clone(&store);
            bus.on(AuthEvent::Unauthorized, move || {
                let current_user = Arc::clone(&current_user);
                let store = Arc::clone(&store);
                async move {
                    if let Err(err) = Self::clear_local(&current_user, &store).await {
                        warn!("failed to clear stored user after unauthorized: {err}");
                    }
                }
            })
            .await;
        }

        Self {
            client,
            store,
            bus,
            current_user,
        }
    }

    async fn clear_local(
        current_user: &RwLock<Option<User>>,
        store: &S,
    ) -> user_store::Result<()> {
        current_user.write().await.take();
        store.clear().await
    }

    /// Establish a remote session and adopt the resulting user.
    ///
    /// A failed attempt surfaces immediately; retry policy belongs to
    /// the caller. Failure never leaves a partial user behind in memory
    /// or storage.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<DecoratedUser> {
        let response = match self
            .client
            .create_session(&credentials.username, &credentials.password)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                info!("login failure: {err}");
                return Err(err);
            }
        };

        let user = User {
            name: response.user_ctx.name.clone(),
            roles: response.user_ctx.roles.clone(),
            bearer_token: response.bearer_token.clone(),
        };

        *self.current_user.write().await = Some(user.clone());
        if let Err(err) = self.store.set(&user).await {
            self.current_user.write().await.take();
            error!("failed to persist user after sign-in: {err}");
            return Err(err.into());
        }

        // Confirm the session is live server-side before reporting
        // success.
        if let Err(err) = self.client.inspect_session().await {
            self.abandon_sign_in().await;
            info!("login failure: {err}");
            return Err(AuthError::LoginFailureUnknown(err.to_string()));
        }

        if !response.ok {
            self.abandon_sign_in().await;
            info!("login failure: unknown");
            return Err(AuthError::LoginFailureUnknown(
                "session creation response lacked ok confirmation".to_string(),
            ));
        }

        self.bus.trigger(AuthEvent::AuthenticationStateChange).await;
        info!("login success: {}", user.name);
        Ok(DecoratedUser::new(user))
    }

    async fn abandon_sign_in(&self) {
        if let Err(err) = Self::clear_local(&self.current_user, &self.store).await {
            warn!("failed to clear partial sign-in state: {err}");
        }
    }

    /// Destroy the remote session and clear local state.
    ///
    /// Local cleanup runs even when the remote destroy fails (the
    /// failure is logged), and the state-change event fires exactly
    /// once, after cleanup, win or lose.
    pub async fn sign_out(&self) -> Result<()> {
        if let Err(err) = self.client.destroy_session().await {
            warn!("remote session destroy failed: {err}");
        }

        let cleanup = Self::clear_local(&self.current_user, &self.store).await;
        self.bus.trigger(AuthEvent::AuthenticationStateChange).await;

        info!("signed out");
        cleanup.map_err(AuthError::from)
    }

    /// Resolve the current user: memory first, storage second.
    ///
    /// The in-memory fast path performs no network call. When the user
    /// is recovered from storage, the remote session is re-inspected as
    /// a liveness probe; the probe result is informational only and the
    /// cached user is served either way.
    pub async fn get_current_user(&self) -> Result<DecoratedUser> {
        if let Some(user) = self.current_user.read().await.clone() {
            return Ok(DecoratedUser::new(user));
        }

        let stored = match self.store.get().await {
            Ok(stored) => stored,
            Err(err) => {
                error!("failed to read stored user: {err}");
                return Err(err.into());
            }
        };
        let Some(user) = stored else {
            return Err(AuthError::UserNotFound);
        };

        *self.current_user.write().await = Some(user.clone());

        if let Err(err) = self.client.inspect_session().await {
            warn!("session liveness check failed: {err}");
        }

        Ok(DecoratedUser::new(user))
    }

    /// Inspect the remote session directly.
    pub async fn get_session(&self) -> Result<SessionInfo> {
        self.client.inspect_session().await
    }

    /// Request a password reset, either by token + new password or by
    /// reset-link email.
    pub async fn reset_password(&self, options: ResetPasswordOptions) -> Result<()> {
        let Some(request) = options.into_request() else {
            return Err(AuthError::Validation(
                "reset requires either token and password, or email".to_string(),
            ));
        };
        self.client.reset_password(&request).await
    }

    pub async fn add_account(&self) -> Result<()> {
        Err(AuthError::NotImplemented)
    }

    pub async fn update_account(&self) -> Result<()> {
        Err(AuthError::NotImplemented)
    }

    pub async fn remove_account(&self) -> Result<()> {
        Err(AuthError::NotImplemented)
    }

    /// Subscribe to an auth event on this manager's bus.
    pub async fn on<F, Fut>(&self, event: AuthEvent, handler: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.bus.on(event, handler).await;
    }

    /// Trigger an auth event on this manager's bus.
    pub async fn trigger(&self, event: AuthEvent) {
        self.bus.trigger(event).await;
    }
}
