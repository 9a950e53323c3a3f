//! Client configuration.
//!
//! [`ClientConfig`] carries the backend base address and an optional request
//! timeout. It is read from `~/.config/scout/config.toml` (or the platform
//! equivalent) by [`ConfigStore`], then environment overrides are applied.
//! A missing file means defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the backend address
pub const ENV_BASE_URL: &str = "SCOUT_BASE_URL";

/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "SCOUT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the search backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Requests run to completion when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Apply `SCOUT_BASE_URL` / `SCOUT_TIMEOUT_SECS` on top of this config.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_TIMEOUT_SECS).ok(),
        )
    }

    fn apply_overrides(
        mut self,
        base_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = base_url.filter(|s| !s.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = timeout_secs.filter(|s| !s.trim().is_empty()) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("{} must be an integer, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(self)
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `base_url` parses as an absolute `http` or `https` URL
    /// - `timeout_secs`, when set, is greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// The base URL with a trailing slash, so endpoint joins keep any path prefix.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let mut url = Url::parse(self.base_url.trim())
            .map_err(|e| ConfigError::Invalid(format!("base_url '{}': {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// File-backed TOML store for [`ClientConfig`].
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store at the default location.
    pub fn new_default() -> Self {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        let path = base.join("scout").join("config.toml");
        Self { path }
    }

    /// Create a store at a custom path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the stored config, or defaults when no file exists yet.
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientConfig::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, config: &ClientConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Set a single key by name. Recognised keys: `base_url`, `timeout_secs`.
    ///
    /// An empty `timeout_secs` value clears the timeout.
    pub fn set(&self, key: &str, value: &str) -> Result<ClientConfig, ConfigError> {
        let mut config = self.load()?;
        match key {
            "base_url" => config.base_url = value.trim().to_string(),
            "timeout_secs" => {
                config.timeout_secs = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.trim().parse::<u64>().map_err(|_| {
                        ConfigError::Invalid(format!(
                            "timeout_secs must be an integer, got '{}'",
                            value
                        ))
                    })?)
                };
            }
            other => {
                return Err(ConfigError::Invalid(format!(
                    "unknown key '{}' (expected base_url or timeout_secs)",
                    other
                )))
            }
        }
        config.validate()?;
        self.save(&config)?;
        Ok(config)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout_secs.is_none());
        assert!(config.timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://search.local:8000/api");
        let url = config.parsed_base_url().unwrap();
        assert_eq!(url.as_str(), "http://search.local:8000/api/");
        assert_eq!(
            url.join("ask-ai/").unwrap().as_str(),
            "http://search.local:8000/api/ask-ai/"
        );
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let config = ClientConfig::default().with_base_url("ftp://example.com");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ClientConfig::default().with_base_url("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ClientConfig::default().with_timeout_secs(0);
        assert!(config.validate().is_err());

        let config = ClientConfig::default().with_timeout_secs(30);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let config = ClientConfig::default()
            .apply_overrides(Some("https://scout.example".into()), Some("12".into()))
            .unwrap();
        assert_eq!(config.base_url, "https://scout.example");
        assert_eq!(config.timeout_secs, Some(12));

        let err = ClientConfig::default().apply_overrides(None, Some("soon".into()));
        assert!(err.is_err());

        let untouched = ClientConfig::default()
            .apply_overrides(Some("  ".into()), None)
            .unwrap();
        assert_eq!(untouched, ClientConfig::default());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested").join("config.toml"));
        assert_eq!(store.load().unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("scout").join("config.toml"));
        let config = ClientConfig::default()
            .with_base_url("http://10.0.0.5:8000")
            .with_timeout_secs(20);
        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_set_updates_single_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.toml"));

        let config = store.set("timeout_secs", "15").unwrap();
        assert_eq!(config.timeout_secs, Some(15));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let config = store.set("timeout_secs", "").unwrap();
        assert!(config.timeout_secs.is_none());

        assert!(store.set("colour", "blue").is_err());
        assert!(store.set("base_url", "gopher://old").is_err());
        assert_eq!(store.load().unwrap().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = 5\n").unwrap();
        let config = ConfigStore::new(path).load().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, Some(5));
    }
}
