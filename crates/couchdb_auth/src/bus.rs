//! Isolated publish/subscribe channel for authentication state changes.
//!
//! Deliberately separate from any application-wide event system: only
//! `SessionManager` and `AuthorizationPolicy` trigger events here, while
//! any interested observer may subscribe.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::Mutex;

/// Events published on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthEvent {
    /// A sign-in or sign-out transition completed.
    AuthenticationStateChange,
    /// An authenticated user lacked the required privileges.
    Unauthorized,
    /// No valid session was available.
    Unauthenticated,
}

impl AuthEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthEvent::AuthenticationStateChange => "authenticationStateChange",
            AuthEvent::Unauthorized => "unauthorized",
            AuthEvent::Unauthenticated => "unauthenticated",
        }
    }
}

type Handler = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Event bus with ordered, in-turn delivery.
///
/// `trigger` awaits every handler before returning, in subscription
/// order, so a caller observing `trigger`'s completion has also observed
/// every subscriber's reaction.
#[derive(Default)]
pub struct AuthStateBus {
    subscribers: Mutex<HashMap<AuthEvent, Vec<Handler>>>,
}

impl AuthStateBus {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe a handler to `event`. Handlers fire in subscription
    /// order.
    pub async fn on<F, Fut>(&self, event: AuthEvent, handler: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: Handler = Arc::new(move || {
            let fut: BoxFuture<'static, ()> = Box::pin(handler());
            fut
        });
        self.subscribers
            .lock()
            .await
            .entry(event)
            .or_default()
            .push(handler);
    }

    /// Deliver `event` to every subscriber, sequentially.
    ///
    /// The registry lock is released before handlers run, so handlers
    /// may subscribe or trigger further events without deadlocking.
    pub async fn trigger(&self, event: AuthEvent) {
        let handlers: Vec<Handler> = {
            let subscribers = self.subscribers.lock().await;
            subscribers.get(&event).cloned().unwrap_or_default()
        };

        log::debug!(
            "auth event {} delivered to {} subscriber(s)",
            event.as_str(),
            handlers.len()
        );

        for handler in handlers {
            handler().await;
        }
    }
}
