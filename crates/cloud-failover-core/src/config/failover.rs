//! Top-level failover configuration (env or YAML)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use super::defaults::*;
use super::error::{ConfigError, ConfigResult};
use super::provider::{AuthScheme, ProviderConfig};

/// Where log records go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    /// JSON-lines log file; `None` disables the file sink
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Mirror records to the console
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            console: true,
        }
    }
}

fn default_console() -> bool {
    true
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from(DEFAULT_CREDENTIALS_PATH)
}

/// Complete configuration for a `CloudFailoverService`
///
/// # Example
///
/// ```
/// use cloud_failover_core::config::FailoverConfig;
///
/// let yaml = r#"
/// primary:
///   name: google
///   api_url: https://gcp-api.ehb.com
/// secondary:
///   name: aws
///   api_url: https://aws-api.ehb.com
///   auth: key_pair
/// "#;
/// let config = FailoverConfig::from_yaml_str(yaml).unwrap();
/// assert_eq!(config.secondary.name, "aws");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailoverConfig {
    pub primary: ProviderConfig,
    pub secondary: ProviderConfig,
    /// Credentials JSON file, tried before environment variables
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for FailoverConfig {
    fn default() -> Self {
        Self {
            primary: ProviderConfig::new(PRIMARY_PROVIDER, DEFAULT_PRIMARY_URL)
                .with_auth(AuthScheme::Bearer),
            secondary: ProviderConfig::new(SECONDARY_PROVIDER, DEFAULT_SECONDARY_URL)
                .with_auth(AuthScheme::KeyPair),
            credentials_path: default_credentials_path(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FailoverConfig {
    /// Build from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env` and by tests)
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_PRIMARY_URL) {
            config.primary.api_url = url;
        }
        if let Some(url) = get(ENV_SECONDARY_URL) {
            config.secondary.api_url = url;
        }
        if let Some(level) = get(ENV_LOG_LEVEL) {
            config.logging.level = level
                .parse()
                .map_err(|e: String| ConfigError::invalid_value(ENV_LOG_LEVEL, e))?;
        }
        if let Some(file) = get(ENV_LOG_FILE) {
            config.logging.file = Some(PathBuf::from(file));
        }
        if let Some(path) = get(ENV_CREDENTIALS_FILE) {
            config.credentials_path = PathBuf::from(path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse from YAML text
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: FailoverConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Providers in failover order
    pub fn providers(&self) -> [&ProviderConfig; 2] {
        [&self.primary, &self.secondary]
    }

    /// Check structural invariants
    ///
    /// - provider names are non-empty and distinct (case-insensitive)
    /// - base URLs are absolute http(s) URLs
    /// - timeouts are non-zero and at least one attempt is configured
    pub fn validate(&self) -> ConfigResult<()> {
        for provider in self.providers() {
            if provider.name.trim().is_empty() {
                return Err(ConfigError::invalid_value("name", "provider name must not be empty"));
            }

            let parsed = reqwest::Url::parse(&provider.api_url).map_err(|_| ConfigError::InvalidUrl {
                provider: provider.name.clone(),
                url: provider.api_url.clone(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl {
                    provider: provider.name.clone(),
                    url: provider.api_url.clone(),
                });
            }

            if provider.timeout.is_zero() {
                return Err(ConfigError::invalid_value(
                    format!("{}.timeout_ms", provider.name),
                    "timeout must be greater than zero",
                ));
            }
            if provider.retry_attempts == 0 {
                return Err(ConfigError::invalid_value(
                    format!("{}.retry_attempts", provider.name),
                    "at least one attempt is required",
                ));
            }
        }

        if self.primary.name.eq_ignore_ascii_case(&self.secondary.name) {
            return Err(ConfigError::DuplicateProvider(self.primary.name.clone()));
        }

        Ok(())
    }
}
