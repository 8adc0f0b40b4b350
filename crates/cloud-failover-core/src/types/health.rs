//! Health check results

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of probing a single provider's health endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderHealth {
    pub provider: String,
    pub healthy: bool,
    /// HTTP status, when the provider answered at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Body returned by the health endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub latency_ms: u64,
}

impl ProviderHealth {
    pub fn up(provider: impl Into<String>, status_code: u16, details: Value, latency_ms: u64) -> Self {
        Self {
            provider: provider.into(),
            healthy: true,
            status_code: Some(status_code),
            details: Some(details),
            error: None,
            latency_ms,
        }
    }

    pub fn down(
        provider: impl Into<String>,
        status_code: Option<u16>,
        error: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        Self {
            provider: provider.into(),
            healthy: false,
            status_code,
            details: None,
            error: Some(error.into()),
            latency_ms,
        }
    }
}

/// Aggregate status across all probed providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every provider answered
    Healthy,
    /// At least one provider answered, at least one did not
    Degraded,
    /// No provider answered
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
        }
    }
}

/// Health of both providers, each settled independently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Per-provider results keyed by provider name
    pub providers: BTreeMap<String, ProviderHealth>,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    /// Build a report from individual probe results
    pub fn from_results(results: impl IntoIterator<Item = ProviderHealth>) -> Self {
        let providers: BTreeMap<String, ProviderHealth> = results
            .into_iter()
            .map(|h| (h.provider.clone(), h))
            .collect();

        let up = providers.values().filter(|h| h.healthy).count();
        let status = if providers.is_empty() || up == 0 {
            HealthStatus::Unhealthy
        } else if up == providers.len() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            providers,
            checked_at: Utc::now(),
        }
    }

    /// Result for one provider
    pub fn provider(&self, name: &str) -> Option<&ProviderHealth> {
        self.providers.get(name)
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
