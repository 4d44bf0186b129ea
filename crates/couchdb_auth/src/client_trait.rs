use async_trait::async_trait;

use crate::error::Result;
use crate::session::{ResetPasswordRequest, SessionCreationResponse, SessionInfo};

/// Remote session endpoint operations.
///
/// The seam between `SessionManager` and the HTTP transport; tests
/// substitute scripted implementations.
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// `POST /_session`. Fails with `InvalidCredentials` on a 401 and
    /// `LoginFailureUnknown` on any other failure.
    async fn create_session(&self, name: &str, password: &str) -> Result<SessionCreationResponse>;

    /// `GET /_session`. Idempotent.
    async fn inspect_session(&self) -> Result<SessionInfo>;

    /// `DELETE /_session`. Idempotent.
    async fn destroy_session(&self) -> Result<()>;

    /// `POST /reset-password`.
    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()>;
}
