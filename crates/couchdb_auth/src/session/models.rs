//! Wire models for the remote session endpoint.

use serde::{Deserialize, Serialize};

/// Callback URL carried by email-based reset-link requests.
pub const RESET_PASSWORD_CALLBACK_URL: &str = "http://localhost:5000/#/reset-password";

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateSessionRequest<'a> {
    pub name: &'a str,
    pub password: &'a str,
}

/// User context block of a session response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Body of a successful `POST /_session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreationResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(rename = "userCtx")]
    pub user_ctx: UserContext,
    #[serde(rename = "bearerToken", default)]
    pub bearer_token: Option<String>,
}

/// Body of `GET /_session`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub ok: bool,
    #[serde(rename = "userCtx", default)]
    pub user_ctx: Option<UserContext>,
}

/// Caller-facing shape of a password reset request. Exactly one of the
/// two branches must be populated: `token` + `password`, or `email`.
#[derive(Debug, Clone, Default)]
pub struct ResetPasswordOptions {
    pub token: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

impl ResetPasswordOptions {
    pub fn with_token(token: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            password: Some(password.into()),
            email: None,
        }
    }

    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            token: None,
            password: None,
            email: Some(email.into()),
        }
    }

    /// Resolves the request branch, or `None` when neither shape matches.
    pub(crate) fn into_request(self) -> Option<ResetPasswordRequest> {
        if let (Some(token), Some(password)) = (self.token, self.password) {
            return Some(ResetPasswordRequest::Token { token, password });
        }
        if let Some(email) = self.email {
            return Some(ResetPasswordRequest::Email {
                email,
                callback_url: RESET_PASSWORD_CALLBACK_URL.to_string(),
            });
        }
        None
    }
}

/// Wire body of `POST /reset-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResetPasswordRequest {
    Token {
        token: String,
        password: String,
    },
    Email {
        email: String,
        #[serde(rename = "callbackUrl")]
        callback_url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_response_parses_couch_shape() {
        let body = r#"{
            "ok": true,
            "userCtx": {"name": "test", "roles": ["editor"]},
            "bearerToken": "AUTH_TOKEN"
        }"#;

        let response: SessionCreationResponse = serde_json::from_str(body).expect("parse");
        assert!(response.ok);
        assert_eq!(response.user_ctx.name, "test");
        assert_eq!(response.user_ctx.roles, vec!["editor"]);
        assert_eq!(response.bearer_token.as_deref(), Some("AUTH_TOKEN"));
    }

    #[test]
    fn creation_response_tolerates_missing_optional_fields() {
        let body = r#"{"userCtx": {"name": "test"}}"#;
        let response: SessionCreationResponse = serde_json::from_str(body).expect("parse");
        assert!(!response.ok);
        assert!(response.user_ctx.roles.is_empty());
        assert!(response.bearer_token.is_none());
    }

    #[test]
    fn token_branch_wins_over_email() {
        let options = ResetPasswordOptions {
            token: Some("t".to_string()),
            password: Some("p".to_string()),
            email: Some("e@example.com".to_string()),
        };

        assert_eq!(
            options.into_request(),
            Some(ResetPasswordRequest::Token {
                token: "t".to_string(),
                password: "p".to_string(),
            })
        );
    }

    #[test]
    fn email_branch_carries_fixed_callback_url() {
        let request = ResetPasswordOptions::with_email("e@example.com")
            .into_request()
            .expect("email branch");

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["email"], "e@example.com");
        assert_eq!(json["callbackUrl"], RESET_PASSWORD_CALLBACK_URL);
    }

    #[test]
    fn neither_shape_resolves_to_no_request() {
        assert_eq!(ResetPasswordOptions::default().into_request(), None);

        // A token without a password is not a valid shape either.
        let partial = ResetPasswordOptions {
            token: Some("t".to_string()),
            password: None,
            email: None,
        };
        assert_eq!(partial.into_request(), None);
    }
}
