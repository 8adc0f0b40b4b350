//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::types::{ProviderRequest, ProviderResponse};
use super::error::{TransportError, TransportResult};
use super::traits::Transport;

/// HTTP transport sharing one connection pool across providers
///
/// No connections or handles are held for the caller between requests beyond
/// reqwest's idle pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a fresh client
    pub fn new() -> TransportResult<Self> {
        let client = Client::builder().pool_max_idle_per_host(10).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client (custom TLS, proxies, ...)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn classify(error: reqwest::Error, request: &ProviderRequest) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                url: request.url.clone(),
                timeout: request.timeout,
            }
        } else if error.is_connect() {
            TransportError::Connection {
                url: request.url.clone(),
                message: error.to_string(),
            }
        } else {
            TransportError::Http(error)
        }
    }

    /// JSON when possible, otherwise the raw text as a JSON string
    fn parse_body(bytes: &[u8]) -> Value {
        if bytes.is_empty() {
            return Value::Null;
        }
        serde_json::from_slice(bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, request: ProviderRequest) -> TransportResult<ProviderResponse> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            // Basic auth owns the Authorization header when present
            if request.basic_auth.is_some() && name.eq_ignore_ascii_case("authorization") {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(auth) = &request.basic_auth {
            builder = builder.basic_auth(&auth.username, auth.password.as_ref());
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::classify(e, &request))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::classify(e, &request))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: request.url,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(ProviderResponse::new(
            request.provider,
            status.as_u16(),
            Self::parse_body(&bytes),
        ))
    }
}
