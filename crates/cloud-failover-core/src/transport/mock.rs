//! Mock transport for testing
//!
//! Provides deterministic, URL-routed responses without network dependencies.
//! Every request is recorded so tests can assert on exactly what was sent.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::types::{ProviderRequest, ProviderResponse};
use super::error::{TransportError, TransportResult};
use super::traits::Transport;

/// Scripted outcome for one request
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Respond with a status and JSON body (non-2xx becomes `TransportError::Status`)
    Json { status: u16, body: Value },
    /// Fail as if the connection could not be made
    Fail(String),
    /// Fail immediately as if the request timeout elapsed
    Timeout,
    /// Wait, then produce the inner response
    Delayed(Duration, Box<MockResponse>),
}

impl MockResponse {
    /// 200 with the given body
    pub fn ok(body: Value) -> Self {
        MockResponse::Json { status: 200, body }
    }

    pub fn status(status: u16, body: Value) -> Self {
        MockResponse::Json { status, body }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        MockResponse::Fail(message.into())
    }

    pub fn delayed(self, delay: Duration) -> Self {
        MockResponse::Delayed(delay, Box::new(self))
    }
}

/// Transport that answers from a per-URL script
///
/// Each URL holds a queue of responses. Responses are consumed in order and
/// the last one repeats forever. Requests to URLs with no script fail with a
/// connection error.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, VecDeque<MockResponse>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `url`
    pub fn respond(&self, url: impl Into<String>, response: MockResponse) {
        self.routes
            .lock()
            .entry(url.into())
            .or_default()
            .push_back(response);
    }

    /// Builder-style `respond`
    pub fn with_route(self, url: impl Into<String>, response: MockResponse) -> Self {
        self.respond(url, response);
        self
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Number of requests sent to `url`
    pub fn calls_to(&self, url: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.url == url).count()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }

    fn next_response(&self, url: &str) -> Option<MockResponse> {
        let mut routes = self.routes.lock();
        let queue = routes.get_mut(url)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, request: ProviderRequest) -> TransportResult<ProviderResponse> {
        self.requests.lock().push(request.clone());

        let Some(mut response) = self.next_response(&request.url) else {
            return Err(TransportError::Connection {
                url: request.url,
                message: "no mock route".to_string(),
            });
        };

        while let MockResponse::Delayed(delay, inner) = response {
            tokio::time::sleep(delay).await;
            response = *inner;
        }

        match response {
            MockResponse::Json { status, body } if (200..300).contains(&status) => {
                Ok(ProviderResponse::new(request.provider, status, body))
            }
            MockResponse::Json { status, body } => Err(TransportError::Status {
                status,
                url: request.url,
                body: body.to_string(),
            }),
            MockResponse::Fail(message) => Err(TransportError::Connection {
                url: request.url,
                message,
            }),
            MockResponse::Timeout => Err(TransportError::Timeout {
                url: request.url,
                timeout: request.timeout,
            }),
            MockResponse::Delayed(..) => Err(TransportError::Other("unresolved delayed response".to_string())),
        }
    }
}
