//! HTTP implementation of the remote session endpoint.

use std::time::Duration;

use async_trait::async_trait;
use auth_core::AuthConfig;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};

use crate::client_trait::SessionClient;
use crate::error::{AuthError, Result};
use crate::session::models::{
    CreateSessionRequest, ResetPasswordRequest, SessionCreationResponse, SessionInfo,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Session endpoint client.
///
/// The session cookie issued by the backend is held by the underlying
/// HTTP client's cookie store; no session entity is kept here.
#[derive(Debug, Clone)]
pub struct RemoteSessionClient {
    client: Client,
    base_url: String,
}

impl RemoteSessionClient {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(Self::default_headers(config)?)
            .cookie_store(true)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|err| AuthError::Transport(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn default_headers(config: &AuthConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (key, value) in &config.default_http_fields {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|err| AuthError::Validation(format!("Invalid header name {key}: {err}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| AuthError::Validation(format!("Invalid header value for {key}: {err}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl SessionClient for RemoteSessionClient {
    async fn create_session(&self, name: &str, password: &str) -> Result<SessionCreationResponse> {
        let response = self
            .client
            .post(self.endpoint("_session"))
            .json(&CreateSessionRequest { name, password })
            .send()
            .await
            .map_err(|err| AuthError::LoginFailureUnknown(err.to_string()))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if !response.status().is_success() {
            return Err(AuthError::LoginFailureUnknown(format!(
                "session creation returned {}",
                response.status()
            )));
        }

        response
            .json::<SessionCreationResponse>()
            .await
            .map_err(|err| AuthError::LoginFailureUnknown(err.to_string()))
    }

    async fn inspect_session(&self) -> Result<SessionInfo> {
        let response = self
            .client
            .get(self.endpoint("_session"))
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Transport(format!(
                "session inspect returned {}",
                response.status()
            )));
        }

        response
            .json::<SessionInfo>()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))
    }

    async fn destroy_session(&self) -> Result<()> {
        let response = self
            .client
            .delete(self.endpoint("_session"))
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Transport(format!(
                "session destroy returned {}",
                response.status()
            )));
        }

        debug!("remote session destroyed");
        Ok(())
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("reset-password"))
            .json(request)
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Transport(format!(
                "password reset returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
