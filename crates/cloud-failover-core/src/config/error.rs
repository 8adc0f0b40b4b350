//! Configuration errors

/// Errors that can occur while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid URL for provider {provider}: {url}")]
    InvalidUrl { provider: String, url: String },

    #[error("Duplicate provider name: {0}")]
    DuplicateProvider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
