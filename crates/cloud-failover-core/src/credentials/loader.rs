//! Chained credential loading with fallback

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::DEFAULT_CREDENTIALS_PATH;
use crate::logging::{ConsoleLogger, LogLevel, LogRecord, SharedLogger};
use super::env_source::EnvCredentialSource;
use super::file_source::FileCredentialSource;
use super::traits::{CloudCredentials, CredentialSource};

/// Credentials together with the source that supplied them
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub credentials: CloudCredentials,
    /// Name of the source (`file`, `env`, or `defaults`)
    pub source: String,
}

/// Tries credential sources in priority order and returns the first success
///
/// Loading never fails: a source that errors is logged as a warning and the
/// next one is tried. If every source fails, the result holds only the
/// default regions.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use cloud_failover_core::credentials::CredentialsLoader;
/// use cloud_failover_core::logging::ConsoleLogger;
///
/// let loader = CredentialsLoader::with_defaults("config/cloud-credentials.json", Arc::new(ConsoleLogger::new()));
/// let credentials = loader.load();
/// ```
pub struct CredentialsLoader {
    sources: Vec<Arc<dyn CredentialSource>>,
    logger: SharedLogger,
}

impl CredentialsLoader {
    pub fn new(sources: Vec<Arc<dyn CredentialSource>>, logger: SharedLogger) -> Self {
        Self { sources, logger }
    }

    /// File at `path` first, then the process environment
    pub fn with_defaults(path: impl Into<PathBuf>, logger: SharedLogger) -> Self {
        let sources: Vec<Arc<dyn CredentialSource>> = vec![
            Arc::new(FileCredentialSource::new(path)),
            Arc::new(EnvCredentialSource::new()),
        ];
        Self::new(sources, logger)
    }

    pub fn sources(&self) -> &[Arc<dyn CredentialSource>] {
        &self.sources
    }

    /// Resolve credentials and report where they came from
    pub fn resolve(&self) -> ResolvedCredentials {
        for source in &self.sources {
            match source.load() {
                Ok(credentials) => {
                    self.logger.log(
                        &LogRecord::new(LogLevel::Debug, "Loaded cloud credentials")
                            .with_field("source", source.name()),
                    );
                    return ResolvedCredentials {
                        credentials,
                        source: source.name().to_string(),
                    };
                }
                Err(e) => {
                    self.logger.log(
                        &LogRecord::new(LogLevel::Warn, "Credential source failed, falling back")
                            .with_field("source", source.name())
                            .with_field("error", e),
                    );
                }
            }
        }

        self.logger.warn("No credential source succeeded, using default regions only");
        ResolvedCredentials {
            credentials: CloudCredentials::with_default_regions(),
            source: "defaults".to_string(),
        }
    }

    /// Resolve credentials, discarding the source
    pub fn load(&self) -> CloudCredentials {
        self.resolve().credentials
    }
}

// Implement Debug manually since Arc<dyn CredentialSource> doesn't implement Debug
impl std::fmt::Debug for CredentialsLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("CredentialsLoader")
            .field("sources", &names)
            .finish()
    }
}

/// Load credentials from `config/cloud-credentials.json`, falling back to the environment
///
/// Warnings are printed to the console.
pub fn load_credentials() -> CloudCredentials {
    CredentialsLoader::with_defaults(DEFAULT_CREDENTIALS_PATH, Arc::new(ConsoleLogger::new())).load()
}
