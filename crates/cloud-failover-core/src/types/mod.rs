//! Core types shared by the transport and failover layers

mod request;
mod health;

pub use request::{HttpMethod, ProviderRequest, ProviderResponse, BasicAuth};
pub use health::{HealthReport, HealthStatus, ProviderHealth};
