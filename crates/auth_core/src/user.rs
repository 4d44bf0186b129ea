use serde::{Deserialize, Serialize};

/// Role name CouchDB grants to server administrators.
pub const ADMIN_ROLE: &str = "_admin";

/// The persisted/cached user record.
///
/// This is always a plain value with exactly these three fields. Role
/// queries live on [`DecoratedUser`], which is attached at the moment a
/// user is handed to a caller and never written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            name: name.into(),
            roles,
            bearer_token: None,
        }
    }
}

/// Read view over a [`User`] adding role queries.
///
/// Deliberately not serializable: only the inner plain record may be
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedUser {
    user: User,
}

impl DecoratedUser {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn name(&self) -> &str {
        &self.user.name
    }

    pub fn roles(&self) -> &[String] {
        &self.user.roles
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.user.bearer_token.as_deref()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.user.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    /// Consumes the view, returning the plain record.
    pub fn into_inner(self) -> User {
        self.user
    }
}

impl From<User> for DecoratedUser {
    fn from(user: User) -> Self {
        Self::new(user)
    }
}

impl AsRef<User> for DecoratedUser {
    fn as_ref(&self) -> &User {
        &self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_role_matches_exact_names() {
        let user = User::new("ada", vec!["editor".to_string()]);
        let decorated = DecoratedUser::new(user);

        assert!(decorated.has_role("editor"));
        assert!(!decorated.has_role("edit"));
        assert!(!decorated.has_role("_admin"));
    }

    #[test]
    fn is_admin_requires_admin_role() {
        let plain = DecoratedUser::new(User::new("test", vec![]));
        assert!(!plain.is_admin());

        let admin = DecoratedUser::new(User::new("root", vec![ADMIN_ROLE.to_string()]));
        assert!(admin.is_admin());
    }

    #[test]
    fn user_serializes_without_behavior() {
        let user = User {
            name: "test".to_string(),
            roles: vec!["editor".to_string()],
            bearer_token: Some("token".to_string()),
        };

        let json = serde_json::to_value(&user).expect("serialize");
        let object = json.as_object().expect("object");
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["bearer_token", "name", "roles"]);
    }

    #[test]
    fn missing_optional_fields_deserialize() {
        let user: User = serde_json::from_str(r#"{"name":"test"}"#).expect("deserialize");
        assert_eq!(user.name, "test");
        assert!(user.roles.is_empty());
        assert!(user.bearer_token.is_none());
    }
}
