//! Failover error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::transport::TransportError;

/// Errors surfaced by `CloudFailoverService`
#[derive(Error, Debug)]
pub enum FailoverError {
    /// A single-provider call failed (`make_request`)
    #[error("Request to {provider} failed: {source}")]
    Provider {
        provider: String,
        source: TransportError,
    },

    /// Both providers failed; the message carries both underlying errors
    #[error("All providers failed. Primary ({primary}): {primary_error}. Secondary ({secondary}): {secondary_error}")]
    AllProvidersFailed {
        primary: String,
        primary_error: TransportError,
        secondary: String,
        secondary_error: TransportError,
    },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type FailoverResult<T> = Result<T, FailoverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_message_contains_both_errors() {
        let err = FailoverError::AllProvidersFailed {
            primary: "google".to_string(),
            primary_error: TransportError::Connection {
                url: "https://gcp-api.ehb.com/users".to_string(),
                message: "connection refused".to_string(),
            },
            secondary: "aws".to_string(),
            secondary_error: TransportError::Status {
                status: 503,
                url: "https://aws-api.ehb.com/users".to_string(),
                body: String::new(),
            },
        };
        let message = err.to_string();
        assert!(message.contains("google"));
        assert!(message.contains("connection refused"));
        assert!(message.contains("aws"));
        assert!(message.contains("status code 503"));

        match err {
            FailoverError::AllProvidersFailed {
                primary_error,
                secondary_error,
                ..
            } => {
                assert_eq!(primary_error.status(), None);
                assert_eq!(secondary_error.status(), Some(503));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
