//! Environment variable credential source

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::config::{DEFAULT_AWS_REGION, DEFAULT_GOOGLE_REGION, PRIMARY_PROVIDER, SECONDARY_PROVIDER};
use super::traits::{CloudCredentials, CredentialSource, Credentials, CredentialsResult};

/// Environment variable names for one provider's credential fields
struct EnvMapping {
    api_key: &'static str,
    access_key_id: Option<&'static str>,
    secret_access_key: Option<&'static str>,
    project_id: Option<&'static str>,
    region: &'static str,
    default_region: &'static str,
}

/// Mapping from provider names to environment variable names
static ENV_MAPPINGS: Lazy<BTreeMap<&'static str, EnvMapping>> = Lazy::new(|| {
    let mut m = BTreeMap::new();
    m.insert(
        PRIMARY_PROVIDER,
        EnvMapping {
            api_key: "GCP_API_KEY",
            access_key_id: None,
            secret_access_key: None,
            project_id: Some("GCP_PROJECT_ID"),
            region: "GCP_REGION",
            default_region: DEFAULT_GOOGLE_REGION,
        },
    );
    m.insert(
        SECONDARY_PROVIDER,
        EnvMapping {
            api_key: "AWS_API_KEY",
            access_key_id: Some("AWS_ACCESS_KEY_ID"),
            secret_access_key: Some("AWS_SECRET_ACCESS_KEY"),
            project_id: None,
            region: "AWS_REGION",
            default_region: DEFAULT_AWS_REGION,
        },
    );
    m
});

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Builds credentials from environment variables
///
/// This source always succeeds: unset variables leave the field empty and
/// regions fall back to `us-central1` (google) and `us-east-1` (aws).
///
/// # Provider Mapping
///
/// - `google`: `GCP_API_KEY`, `GCP_PROJECT_ID`, `GCP_REGION`
/// - `aws`: `AWS_API_KEY`, `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`, `AWS_REGION`
pub struct EnvCredentialSource {
    lookup: Lookup,
}

impl Default for EnvCredentialSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCredentialSource {
    /// Read from the process environment
    pub fn new() -> Self {
        Self::with_lookup(|key| env::var(key).ok())
    }

    /// Read through a custom lookup (tests, embedded hosts)
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Get the environment variable names consulted for a provider
    pub fn get_env_vars_for_provider(provider: &str) -> Option<Vec<&'static str>> {
        ENV_MAPPINGS.get(provider.to_lowercase().as_str()).map(|m| {
            let mut vars = vec![m.api_key];
            vars.extend(m.access_key_id);
            vars.extend(m.secret_access_key);
            vars.extend(m.project_id);
            vars.push(m.region);
            vars
        })
    }

    fn var(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.is_empty())
    }
}

impl CredentialSource for EnvCredentialSource {
    fn name(&self) -> &str {
        "env"
    }

    fn load(&self) -> CredentialsResult<CloudCredentials> {
        let mut credentials = CloudCredentials::new();
        for (provider, mapping) in ENV_MAPPINGS.iter() {
            let var = |name: Option<&str>| name.and_then(|n| self.var(n));
            credentials.insert(
                *provider,
                Credentials {
                    api_key: self.var(mapping.api_key),
                    access_key_id: var(mapping.access_key_id),
                    secret_access_key: var(mapping.secret_access_key),
                    region: self
                        .var(mapping.region)
                        .unwrap_or_else(|| mapping.default_region.to_string()),
                    project_id: var(mapping.project_id),
                },
            );
        }
        Ok(credentials)
    }
}

impl std::fmt::Debug for EnvCredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvCredentialSource").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(vars: &[(&str, &str)]) -> EnvCredentialSource {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvCredentialSource::with_lookup(move |key| map.get(key).cloned())
    }

    #[test]
    fn test_env_source_name() {
        assert_eq!(EnvCredentialSource::new().name(), "env");
    }

    #[test]
    fn test_env_source_reads_all_fields() {
        let creds = source(&[
            ("GCP_API_KEY", "gcp-key"),
            ("GCP_PROJECT_ID", "ehb-project"),
            ("GCP_REGION", "asia-south1"),
            ("AWS_API_KEY", "aws-key"),
            ("AWS_ACCESS_KEY_ID", "AKIA123"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_REGION", "ap-south-1"),
        ])
        .load()
        .unwrap();

        let google = creds.google().unwrap();
        assert_eq!(google.api_key.as_deref(), Some("gcp-key"));
        assert_eq!(google.project_id.as_deref(), Some("ehb-project"));
        assert_eq!(google.region, "asia-south1");
        assert!(google.access_key_id.is_none());

        let aws = creds.aws().unwrap();
        assert_eq!(aws.api_key.as_deref(), Some("aws-key"));
        assert_eq!(aws.access_key_id.as_deref(), Some("AKIA123"));
        assert_eq!(aws.secret_access_key.as_deref(), Some("secret"));
        assert_eq!(aws.region, "ap-south-1");
    }

    #[test]
    fn test_env_source_defaults_when_unset() {
        let creds = source(&[("AWS_REGION", "")]).load().unwrap();
        assert_eq!(creds.google().unwrap().region, "us-central1");
        assert_eq!(creds.aws().unwrap().region, "us-east-1");
        assert!(creds.google().unwrap().api_key.is_none());
        assert!(creds.aws().unwrap().secret_access_key.is_none());
    }

    #[test]
    fn test_env_vars_for_provider() {
        let vars = EnvCredentialSource::get_env_vars_for_provider("AWS").unwrap();
        assert!(vars.contains(&"AWS_ACCESS_KEY_ID"));
        assert!(vars.contains(&"AWS_REGION"));
        assert!(EnvCredentialSource::get_env_vars_for_provider("azure").is_none());
    }
}
