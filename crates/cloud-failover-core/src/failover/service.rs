//! The failover service and its builder

use std::sync::Arc;

use serde_json::Value;

use crate::auth::AuthStrategy;
use crate::config::{ConfigError, FailoverConfig, ProviderConfig};
use crate::credentials::{CloudCredentials, Credentials, CredentialsLoader};
use crate::logging::{build_logger, LogLevel, LogRecord, SharedLogger};
use crate::retry::RetryPolicy;
use crate::transport::{HttpTransport, Transport, TransportError};
use crate::types::{HttpMethod, ProviderRequest, ProviderResponse};
use super::error::{FailoverError, FailoverResult};

/// One provider with everything needed to address it
pub(super) struct ProviderTarget {
    pub(super) config: ProviderConfig,
    credentials: Credentials,
    auth: Arc<dyn AuthStrategy>,
}

impl ProviderTarget {
    fn new(config: ProviderConfig, credentials: &CloudCredentials, logger: &SharedLogger) -> Self {
        let credentials = match credentials.get(config.credentials_key()) {
            Some(found) => found.clone(),
            None => {
                logger.log(
                    &LogRecord::new(LogLevel::Warn, "No credentials configured for provider")
                        .with_field("provider", &config.name)
                        .with_field("credentials_key", config.credentials_key()),
                );
                Credentials::default()
            }
        };
        let auth = config.auth.strategy();
        Self {
            config,
            credentials,
            auth,
        }
    }

    pub(super) fn name(&self) -> &str {
        &self.config.name
    }

    /// Request with this provider's URL, timeout, and auth applied
    pub(super) fn build_request(&self, endpoint: &str, method: HttpMethod, data: Option<Value>) -> ProviderRequest {
        let mut request = ProviderRequest::new(
            &self.config.name,
            method,
            self.config.url_for(endpoint),
            self.config.timeout,
        )
        .with_body(data);
        self.auth.apply(&mut request, &self.credentials);
        request
    }
}

/// Sends requests to a primary provider with transparent failover to a secondary
///
/// Constructed explicitly and passed to whoever needs it; there is no global
/// instance. All state is fixed at construction, so a service can be shared
/// behind an `Arc` and called concurrently.
///
/// # Example
///
/// ```rust,ignore
/// let service = CloudFailoverService::builder(FailoverConfig::from_env()?).build()?;
/// let users = service.get("/users").await?;
/// ```
pub struct CloudFailoverService {
    pub(super) primary: ProviderTarget,
    pub(super) secondary: ProviderTarget,
    current_provider: String,
    pub(super) transport: Arc<dyn Transport>,
    pub(super) logger: SharedLogger,
    retry: RetryPolicy,
}

impl CloudFailoverService {
    /// Start building a service from configuration
    pub fn builder(config: FailoverConfig) -> CloudFailoverServiceBuilder {
        CloudFailoverServiceBuilder::new(config)
    }

    /// Environment config, file-then-env credentials, HTTP transport, file+console logging
    pub fn from_env() -> FailoverResult<Self> {
        let config = FailoverConfig::from_env()?;
        Self::builder(config).build()
    }

    pub fn primary(&self) -> &ProviderConfig {
        &self.primary.config
    }

    pub fn secondary(&self) -> &ProviderConfig {
        &self.secondary.config
    }

    /// Name of the preferred provider; always the primary
    pub fn current_provider(&self) -> &str {
        &self.current_provider
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Execute a request, failing over to the secondary provider on any error
    ///
    /// With the default retry policy this makes one call when the primary
    /// succeeds and two otherwise. If both providers fail, the returned
    /// `FailoverError::AllProvidersFailed` carries both error messages.
    pub async fn execute_request(
        &self,
        endpoint: &str,
        method: HttpMethod,
        data: Option<Value>,
    ) -> FailoverResult<ProviderResponse> {
        let primary_error = match self.attempt(&self.primary, endpoint, method, &data).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        self.logger.log(
            &LogRecord::new(LogLevel::Info, "Failing over to secondary provider")
                .with_field("from", self.primary.name())
                .with_field("to", self.secondary.name())
                .with_field("endpoint", endpoint),
        );

        let secondary_error = match self.attempt(&self.secondary, endpoint, method, &data).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        let error = FailoverError::AllProvidersFailed {
            primary: self.primary.name().to_string(),
            primary_error,
            secondary: self.secondary.name().to_string(),
            secondary_error,
        };
        self.logger.log(
            &LogRecord::new(LogLevel::Error, "All providers failed")
                .with_field("endpoint", endpoint)
                .with_field("method", method)
                .with_field("reason", &error),
        );
        Err(error)
    }

    /// `execute_request(endpoint, GET, None)`
    pub async fn get(&self, endpoint: &str) -> FailoverResult<ProviderResponse> {
        self.execute_request(endpoint, HttpMethod::Get, None).await
    }

    /// Send a single request to one named provider, without failover or retries
    pub async fn make_request(
        &self,
        provider: &str,
        endpoint: &str,
        method: HttpMethod,
        data: Option<Value>,
    ) -> FailoverResult<ProviderResponse> {
        let target = self.target(provider)?;
        let request = target.build_request(endpoint, method, data);
        self.transport
            .send(request)
            .await
            .map_err(|source| FailoverError::Provider {
                provider: target.name().to_string(),
                source,
            })
    }

    pub(super) fn target(&self, provider: &str) -> FailoverResult<&ProviderTarget> {
        [&self.primary, &self.secondary]
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(provider))
            .ok_or_else(|| FailoverError::UnknownProvider(provider.to_string()))
    }

    /// Run the retry policy against one provider
    ///
    /// Intermediate failures log `warn`; the final failure logs one `error`.
    async fn attempt(
        &self,
        target: &ProviderTarget,
        endpoint: &str,
        method: HttpMethod,
        data: &Option<Value>,
    ) -> Result<ProviderResponse, TransportError> {
        let mut attempt = 1;
        loop {
            let request = target.build_request(endpoint, method, data.clone());
            let url = request.url.clone();

            self.logger.log(
                &LogRecord::new(LogLevel::Info, "Attempting request")
                    .with_field("provider", target.name())
                    .with_field("method", method)
                    .with_field("url", &url)
                    .with_field("attempt", attempt),
            );

            match self.transport.send(request).await {
                Ok(response) => {
                    self.logger.log(
                        &LogRecord::new(LogLevel::Info, "Request succeeded")
                            .with_field("provider", target.name())
                            .with_field("endpoint", endpoint)
                            .with_field("status", response.status),
                    );
                    return Ok(response);
                }
                Err(error) => match self.retry.delay_after(attempt) {
                    Some(delay) => {
                        self.logger.log(
                            &LogRecord::new(LogLevel::Warn, "Attempt failed, retrying")
                                .with_field("provider", target.name())
                                .with_field("url", &url)
                                .with_field("attempt", attempt)
                                .with_field("delay_ms", delay.as_millis())
                                .with_field("error", &error),
                        );
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                        attempt += 1;
                    }
                    None => {
                        self.logger.log(
                            &LogRecord::new(LogLevel::Error, "Request failed")
                                .with_field("provider", target.name())
                                .with_field("method", method)
                                .with_field("endpoint", endpoint)
                                .with_field("attempts", attempt)
                                .with_field("error", &error),
                        );
                        return Err(error);
                    }
                },
            }
        }
    }
}

impl std::fmt::Debug for CloudFailoverService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudFailoverService")
            .field("primary", &self.primary.config)
            .field("secondary", &self.secondary.config)
            .field("current_provider", &self.current_provider)
            .field("transport", &self.transport.name())
            .field("retry", &self.retry)
            .finish()
    }
}

/// Builder for `CloudFailoverService`
///
/// Anything not supplied is built from the configuration: credentials via
/// `CredentialsLoader` (file, then environment), an `HttpTransport`, and the
/// logger described by `config.logging`.
pub struct CloudFailoverServiceBuilder {
    config: FailoverConfig,
    credentials: Option<CloudCredentials>,
    transport: Option<Arc<dyn Transport>>,
    logger: Option<SharedLogger>,
    retry: RetryPolicy,
}

impl CloudFailoverServiceBuilder {
    pub fn new(config: FailoverConfig) -> Self {
        Self {
            config,
            credentials: None,
            transport: None,
            logger: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn credentials(mut self, credentials: CloudCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> FailoverResult<CloudFailoverService> {
        self.config.validate()?;

        let logger = self
            .logger
            .unwrap_or_else(|| build_logger(&self.config.logging));

        let credentials = match self.credentials {
            Some(credentials) => credentials,
            None => CredentialsLoader::with_defaults(self.config.credentials_path.clone(), Arc::clone(&logger)).load(),
        };

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new().map_err(|e| {
                ConfigError::Other(format!("Failed to create HTTP client: {}", e))
            })?),
        };

        let primary = ProviderTarget::new(self.config.primary, &credentials, &logger);
        let secondary = ProviderTarget::new(self.config.secondary, &credentials, &logger);

        logger.log(
            &LogRecord::new(LogLevel::Debug, "Cloud failover service ready")
                .with_field("primary", primary.name())
                .with_field("secondary", secondary.name())
                .with_field("transport", transport.name())
                .with_field("max_attempts", self.retry.max_attempts()),
        );

        Ok(CloudFailoverService {
            current_provider: primary.name().to_string(),
            primary,
            secondary,
            transport,
            logger,
            retry: self.retry,
        })
    }
}

impl std::fmt::Debug for CloudFailoverServiceBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudFailoverServiceBuilder")
            .field("config", &self.config)
            .field("has_credentials", &self.credentials.is_some())
            .field("has_transport", &self.transport.is_some())
            .field("retry", &self.retry)
            .finish()
    }
}
