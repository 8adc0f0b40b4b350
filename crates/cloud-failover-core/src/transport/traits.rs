//! Transport trait definition

use async_trait::async_trait;

use crate::types::{ProviderRequest, ProviderResponse};
use super::error::TransportResult;

/// Sends one fully resolved request to a provider
///
/// Implementations must treat non-2xx responses, timeouts, and network
/// errors as `Err`; only successful responses come back as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Get the transport name (e.g. "http", "mock")
    fn name(&self) -> &str;

    /// Perform a single attempt, honoring `request.timeout`
    async fn send(&self, request: ProviderRequest) -> TransportResult<ProviderResponse>;
}
