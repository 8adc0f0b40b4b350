//! Credential types and the source trait

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{DEFAULT_AWS_REGION, DEFAULT_GOOGLE_REGION, PRIMARY_PROVIDER, SECONDARY_PROVIDER};

/// Credentials for a single provider
///
/// No field is required; a provider with missing credentials fails at
/// request time with the provider's own auth error.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

impl Credentials {
    /// Empty credentials in the given region
    pub fn in_region(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_key_pair(mut self, access_key_id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &redact(&self.secret_access_key))
            .field("region", &self.region)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// Credentials for every provider, keyed by provider name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CloudCredentials {
    providers: BTreeMap<String, Credentials>,
}

impl CloudCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty google and aws entries carrying only their default regions
    pub fn with_default_regions() -> Self {
        Self::new()
            .with(PRIMARY_PROVIDER, Credentials::in_region(DEFAULT_GOOGLE_REGION))
            .with(SECONDARY_PROVIDER, Credentials::in_region(DEFAULT_AWS_REGION))
    }

    pub fn with(mut self, provider: impl Into<String>, credentials: Credentials) -> Self {
        self.insert(provider, credentials);
        self
    }

    pub fn insert(&mut self, provider: impl Into<String>, credentials: Credentials) {
        self.providers.insert(provider.into(), credentials);
    }

    pub fn get(&self, provider: &str) -> Option<&Credentials> {
        self.providers.get(provider)
    }

    pub fn google(&self) -> Option<&Credentials> {
        self.get(PRIMARY_PROVIDER)
    }

    pub fn aws(&self) -> Option<&Credentials> {
        self.get(SECONDARY_PROVIDER)
    }

    /// Provider names with credentials, sorted
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Errors a single credential source can report
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("Failed to read credentials: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse credentials: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Credentials unavailable: {0}")]
    Unavailable(String),
}

pub type CredentialsResult<T> = Result<T, CredentialsError>;

/// A place credentials can be loaded from
///
/// Implementations:
/// - `FileCredentialSource`: JSON file on disk
/// - `EnvCredentialSource`: environment variables
pub trait CredentialSource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Load credentials for all providers this source knows about
    fn load(&self) -> CredentialsResult<CloudCredentials>;
}
