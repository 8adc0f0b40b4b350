//! Per-provider request authentication

use std::fmt::Debug;

use crate::credentials::Credentials;
use crate::types::{BasicAuth, ProviderRequest};

/// Applies a provider's credentials to an outgoing request
///
/// Each `ProviderConfig` picks its strategy through `AuthScheme`, so adding a
/// provider never changes how another one authenticates.
pub trait AuthStrategy: Send + Sync + Debug {
    /// Short identifier (e.g. "bearer")
    fn name(&self) -> &str;

    /// Add auth headers/credentials to `request`
    fn apply(&self, request: &mut ProviderRequest, credentials: &Credentials);
}

/// `Authorization: Bearer <apiKey>`
///
/// Nothing is added when the provider has no API key.
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerAuth;

impl AuthStrategy for BearerAuth {
    fn name(&self) -> &str {
        "bearer"
    }

    fn apply(&self, request: &mut ProviderRequest, credentials: &Credentials) {
        if let Some(key) = credentials.api_key.as_deref().filter(|k| !k.is_empty()) {
            request.set_header("Authorization", format!("Bearer {}", key));
        }
    }
}

/// Bearer token plus basic auth from an access key id / secret pair
///
/// Basic auth takes over the `Authorization` header on the wire, so the
/// bearer token only matters when no access key id is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPairAuth;

impl AuthStrategy for KeyPairAuth {
    fn name(&self) -> &str {
        "key_pair"
    }

    fn apply(&self, request: &mut ProviderRequest, credentials: &Credentials) {
        BearerAuth.apply(request, credentials);
        if let Some(access_key_id) = credentials.access_key_id.as_deref().filter(|k| !k.is_empty()) {
            request.basic_auth = Some(BasicAuth {
                username: access_key_id.to_string(),
                password: credentials.secret_access_key.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HttpMethod;
    use std::time::Duration;

    fn request() -> ProviderRequest {
        ProviderRequest::new("p", HttpMethod::Get, "https://example.test/users", Duration::from_secs(1))
    }

    #[test]
    fn test_bearer_sets_header() {
        let mut req = request();
        BearerAuth.apply(&mut req, &Credentials::in_region("us-central1").with_api_key("gcp-key"));
        assert_eq!(req.header("Authorization"), Some("Bearer gcp-key"));
        assert!(req.basic_auth.is_none());
    }

    #[test]
    fn test_bearer_without_key_adds_nothing() {
        let mut req = request();
        BearerAuth.apply(&mut req, &Credentials::default());
        assert!(req.header("Authorization").is_none());
    }

    #[test]
    fn test_key_pair_sets_basic_auth() {
        let mut req = request();
        let creds = Credentials::in_region("us-east-1")
            .with_api_key("aws-key")
            .with_key_pair("AKIA123", "secret");
        KeyPairAuth.apply(&mut req, &creds);

        assert_eq!(req.header("Authorization"), Some("Bearer aws-key"));
        let basic = req.basic_auth.unwrap();
        assert_eq!(basic.username, "AKIA123");
        assert_eq!(basic.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_key_pair_without_access_key() {
        let mut req = request();
        KeyPairAuth.apply(&mut req, &Credentials::default().with_api_key("aws-key"));
        assert!(req.basic_auth.is_none());
        assert_eq!(req.header("Authorization"), Some("Bearer aws-key"));
    }
}
