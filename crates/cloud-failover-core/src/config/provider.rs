//! Per-provider configuration

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::{AuthStrategy, BearerAuth, KeyPairAuth};
use super::defaults::{DEFAULT_HEALTH_PATH, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT};

/// How requests to a provider are authenticated
///
/// Selected per provider in configuration rather than inferred from the
/// provider's name, so adding a provider never changes another one's auth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// `Authorization: Bearer <apiKey>`
    #[default]
    Bearer,
    /// Bearer token plus basic auth from the access key id / secret pair
    KeyPair,
}

impl AuthScheme {
    /// The strategy that applies this scheme to outgoing requests
    pub fn strategy(&self) -> Arc<dyn AuthStrategy> {
        match self {
            AuthScheme::Bearer => Arc::new(BearerAuth),
            AuthScheme::KeyPair => Arc::new(KeyPairAuth),
        }
    }
}

/// Configuration for one provider (primary or secondary)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name (e.g. "google", "aws")
    pub name: String,
    /// Base URL that endpoints are appended to
    pub api_url: String,
    /// Per-request timeout
    #[serde(rename = "timeout_ms", with = "duration_ms", default = "default_timeout")]
    pub timeout: Duration,
    /// Attempts per request when a `RetryPolicy` built from this config is used
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay between attempts for such a policy
    #[serde(rename = "retry_delay_ms", with = "duration_ms", default = "default_retry_delay")]
    pub retry_delay: Duration,
    #[serde(default)]
    pub auth: AuthScheme,
    /// Key into the credentials map; defaults to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_key: Option<String>,
    #[serde(default = "default_health_path")]
    pub health_path: String,
}

impl ProviderConfig {
    /// Create a provider config with default timeout, retry, and auth settings
    pub fn new(name: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_url: api_url.into(),
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            auth: AuthScheme::default(),
            credentials_key: None,
            health_path: DEFAULT_HEALTH_PATH.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay;
        self
    }

    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_credentials_key(mut self, key: impl Into<String>) -> Self {
        self.credentials_key = Some(key.into());
        self
    }

    pub fn with_health_path(mut self, path: impl Into<String>) -> Self {
        self.health_path = path.into();
        self
    }

    /// Name under which this provider's credentials are stored
    pub fn credentials_key(&self) -> &str {
        self.credentials_key.as_deref().unwrap_or(&self.name)
    }

    /// Join the base URL and an endpoint path with exactly one `/`
    ///
    /// A bare query string (`?page=2`) is appended to the base URL directly.
    pub fn url_for(&self, endpoint: &str) -> String {
        let base = self.api_url.trim_end_matches('/');
        if endpoint.starts_with('?') {
            return format!("{}{}", base, endpoint);
        }
        let path = endpoint.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// URL of this provider's health endpoint
    pub fn health_url(&self) -> String {
        self.url_for(&self.health_path)
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_retry_attempts() -> u32 {
    DEFAULT_RETRY_ATTEMPTS
}

fn default_retry_delay() -> Duration {
    DEFAULT_RETRY_DELAY
}

fn default_health_path() -> String {
    DEFAULT_HEALTH_PATH.to_string()
}

/// Serialize `Duration` as whole milliseconds
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let p = ProviderConfig::new("google", "https://gcp-api.ehb.com/");
        assert_eq!(p.url_for("/users"), "https://gcp-api.ehb.com/users");
        assert_eq!(p.url_for("users"), "https://gcp-api.ehb.com/users");
        assert_eq!(p.url_for(""), "https://gcp-api.ehb.com");
        assert_eq!(p.health_url(), "https://gcp-api.ehb.com/health");

        let p = ProviderConfig::new("aws", "https://aws-api.ehb.com/v1")
            .with_health_path("/api/aws-health");
        assert_eq!(p.url_for("/orders/7"), "https://aws-api.ehb.com/v1/orders/7");
        assert_eq!(p.health_url(), "https://aws-api.ehb.com/v1/api/aws-health");
    }

    #[test]
    fn test_query_only_endpoint() {
        let p = ProviderConfig::new("google", "https://gcp-api.ehb.com");
        assert_eq!(p.url_for("?page=2"), "https://gcp-api.ehb.com?page=2");
        assert_eq!(p.url_for("/users?page=2"), "https://gcp-api.ehb.com/users?page=2");

        let p = ProviderConfig::new("aws", "https://aws-api.ehb.com/v1/");
        assert_eq!(p.url_for("?page=2"), "https://aws-api.ehb.com/v1?page=2");
    }

    #[test]
    fn test_credentials_key_defaults_to_name() {
        let p = ProviderConfig::new("gcp-backup", "https://x");
        assert_eq!(p.credentials_key(), "gcp-backup");

        let p = p.with_credentials_key("google");
        assert_eq!(p.credentials_key(), "google");
    }

    #[test]
    fn test_yaml_defaults_and_durations() {
        let yaml = r#"
name: aws
api_url: https://aws-api.ehb.com
timeout_ms: 2500
auth: key_pair
"#;
        let p: ProviderConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.timeout, Duration::from_millis(2500));
        assert_eq!(p.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
        assert_eq!(p.retry_delay, DEFAULT_RETRY_DELAY);
        assert_eq!(p.auth, AuthScheme::KeyPair);
        assert_eq!(p.health_path, "/health");

        let back = serde_yaml::to_string(&p).unwrap();
        assert!(back.contains("timeout_ms: 2500"));
        assert!(back.contains("retry_delay_ms: 1000"));
    }

    #[test]
    fn test_scheme_strategy_names() {
        assert_eq!(AuthScheme::Bearer.strategy().name(), "bearer");
        assert_eq!(AuthScheme::KeyPair.strategy().name(), "key_pair");
    }
}
