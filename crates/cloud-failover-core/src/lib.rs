//! Cloud Failover Core
//!
//! Two-provider request failover for REST backends.
//! A request goes to the primary provider first and, if that attempt fails,
//! is replayed against the secondary provider with identical semantics.
//!
//! ## Building a service
//!
//! ```rust,ignore
//! use cloud_failover_core::{CloudFailoverService, FailoverConfig, HttpMethod};
//!
//! let config = FailoverConfig::from_env()?;
//! let service = CloudFailoverService::builder(config).build()?;
//!
//! let response = service
//!     .execute_request("/users", HttpMethod::Post, Some(serde_json::json!({ "name": "Test User" })))
//!     .await?;
//!
//! let health = service.check_health().await;
//! ```
//!
//! Credentials come from a JSON file when present and from environment
//! variables otherwise (see [`credentials`]). Every attempt is written to the
//! configured [`Logger`] sinks.

pub mod types;
pub mod config;
pub mod credentials;
pub mod logging;
pub mod auth;
pub mod transport;
pub mod retry;
pub mod failover;

// Re-export commonly used types
pub use types::{
    HttpMethod, ProviderRequest, ProviderResponse, BasicAuth,
    HealthReport, HealthStatus, ProviderHealth,
};

pub use config::{
    FailoverConfig, ProviderConfig, AuthScheme, LoggingConfig,
    ConfigError, ConfigResult,
};

pub use credentials::{
    Credentials, CloudCredentials, CredentialSource, CredentialsError, CredentialsResult,
    FileCredentialSource, EnvCredentialSource, CredentialsLoader, ResolvedCredentials,
    load_credentials,
};

pub use logging::{
    Logger, LogLevel, LogRecord, SharedLogger,
    ConsoleLogger, JsonFileLogger, TeeLogger, MemoryLogger, NoOpLogger,
    build_logger,
};

pub use auth::{AuthStrategy, BearerAuth, KeyPairAuth};

pub use transport::{
    Transport, TransportError, TransportResult,
    HttpTransport, MockTransport, MockResponse,
};

pub use retry::{RetryPolicy, Backoff};

pub use failover::{
    CloudFailoverService, CloudFailoverServiceBuilder, FailoverError, FailoverResult,
};
