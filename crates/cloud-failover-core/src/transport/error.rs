//! Transport error types

use std::time::Duration;

use thiserror::Error;

/// Errors a single provider attempt can fail with
#[derive(Error, Debug)]
pub enum TransportError {
    /// No response within the request timeout
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// Could not reach the provider
    #[error("Connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    /// Provider answered with a non-2xx status
    #[error("Request failed with status code {status} ({url})")]
    Status { status: u16, url: String, body: String },

    /// Other HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }

    /// HTTP status, when the provider answered
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type TransportResult<T> = Result<T, TransportError>;
