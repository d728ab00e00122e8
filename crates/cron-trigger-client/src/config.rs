//! Client configuration

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the API endpoint
pub const ENV_API_URL: &str = "CODEFRESH_API_URL";

/// Environment variable carrying the API key
pub const ENV_API_KEY: &str = "CODEFRESH_API_KEY";

pub const DEFAULT_API_URL: &str = "https://g.codefresh.io/api";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Trigger service client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL
    pub api_url: String,

    /// API key sent in the `Authorization` header
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path)?;
                Self::from_toml(&contents)?
            }
            _ => Self::default(),
        };

        config.apply_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_API_KEY).ok(),
        );
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Replace endpoint and key with non-empty overrides
    pub fn apply_overrides(&mut self, api_url: Option<String>, api_key: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.is_empty()) {
            self.api_url = url;
        }
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// API key, or a configuration error naming where to set it
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                ClientError::Config(format!("API key is not set (configure api_key or {})", ENV_API_KEY))
            })
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml(r#"api_key = "secret""#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_toml() {
        let err = ClientConfig::from_toml("timeout_seconds = \"soon\"").unwrap_err();
        assert!(matches!(err, ClientError::Toml(_)));
    }

    #[test]
    fn test_load_missing_config() {
        let config = ClientConfig::load(Some(Path::new("/nonexistent/path/config.toml"))).unwrap();
        assert!(!config.api_url.is_empty());
    }

    #[test]
    fn test_overrides() {
        let mut config = ClientConfig::default();
        config.apply_overrides(Some("http://localhost:3000/api".into()), Some(String::new()));
        assert_eq!(config.api_url, "http://localhost:3000/api");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_require_api_key() {
        let mut config = ClientConfig::default();
        assert!(matches!(config.require_api_key(), Err(ClientError::Config(_))));
        config.api_key = Some("k".into());
        assert_eq!(config.require_api_key().unwrap(), "k");
    }
}
