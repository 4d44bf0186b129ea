use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const CONFIG_FILE_PATH: &str = "auth.toml";

const DEFAULT_NAMESPACE: &str = "eha";
const DEFAULT_STORE_NAME: &str = "auth";

/// Recognized configuration surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Root URL of the remote session endpoint.
    pub base_url: String,
    /// Storage partition name, so multiple app instances do not collide.
    #[serde(default = "default_namespace")]
    pub local_storage_namespace: String,
    /// Sub-store name within the partition.
    #[serde(default = "default_store_name")]
    pub local_storage_store_name: String,
    /// Extra header fields merged into every outgoing request.
    #[serde(default)]
    pub default_http_fields: HashMap<String, String>,
    #[serde(default)]
    pub interceptor: Option<InterceptorConfig>,
}

/// Configuration for the host application's bearer-token interceptor.
///
/// The interceptor itself lives in the host application; this crate only
/// carries the host list it consults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterceptorConfig {
    pub hosts: Vec<String>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthConfig {
    pub fn new() -> Self {
        let mut config = AuthConfig {
            base_url: String::new(),
            local_storage_namespace: default_namespace(),
            local_storage_store_name: default_store_name(),
            default_http_fields: HashMap::new(),
            interceptor: None,
        };

        // Read auth.toml first, if present
        if std::path::Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                match toml::from_str::<AuthConfig>(&content) {
                    Ok(file_config) => config = file_config,
                    Err(err) => log::warn!("Failed to parse {CONFIG_FILE_PATH}: {err}"),
                }
            }
        }

        // Override with environment variables if they exist
        if let Ok(base_url) = std::env::var("COUCHDB_AUTH_URL") {
            config.base_url = base_url;
        }
        if let Ok(namespace) = std::env::var("COUCHDB_AUTH_NAMESPACE") {
            config.local_storage_namespace = namespace;
        }
        if let Ok(store_name) = std::env::var("COUCHDB_AUTH_STORE") {
            config.local_storage_store_name = store_name;
        }
        config
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default_values()
        }
    }

    fn default_values() -> Self {
        Self {
            base_url: String::new(),
            local_storage_namespace: default_namespace(),
            local_storage_store_name: default_store_name(),
            default_http_fields: HashMap::new(),
            interceptor: None,
        }
    }

    /// Whether the host application should attach the bearer token to
    /// requests targeting `host`.
    pub fn is_intercepted_host(&self, host: &str) -> bool {
        self.interceptor
            .as_ref()
            .map(|interceptor| interceptor.hosts.iter().any(|h| h == host))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_storage_partition_is_stable() {
        let config = AuthConfig::with_base_url("http://localhost:5984");
        assert_eq!(config.local_storage_namespace, "eha");
        assert_eq!(config.local_storage_store_name, "auth");
        assert!(config.default_http_fields.is_empty());
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let config: AuthConfig =
            toml::from_str(r#"base_url = "http://couch.example.com""#).expect("parse");
        assert_eq!(config.base_url, "http://couch.example.com");
        assert_eq!(config.local_storage_namespace, "eha");
        assert!(config.interceptor.is_none());
    }

    #[test]
    fn intercepted_hosts_are_exact_matches() {
        let mut config = AuthConfig::with_base_url("http://localhost:5984");
        config.interceptor = Some(InterceptorConfig {
            hosts: vec!["couch.example.com".to_string()],
        });

        assert!(config.is_intercepted_host("couch.example.com"));
        assert!(!config.is_intercepted_host("evil.example.com"));
        assert!(!config.is_intercepted_host("example.com"));
    }

    #[test]
    fn no_interceptor_means_no_hosts() {
        let config = AuthConfig::with_base_url("http://localhost:5984");
        assert!(!config.is_intercepted_host("localhost"));
    }
}
