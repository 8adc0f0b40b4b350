//! Provider health checks

use tokio::time::Instant;

use crate::logging::{LogLevel, LogRecord};
use crate::types::{HealthReport, HttpMethod, ProviderHealth};
use super::error::FailoverResult;
use super::service::{CloudFailoverService, ProviderTarget};

impl CloudFailoverService {
    /// Probe both providers' health endpoints concurrently
    ///
    /// Each probe settles on its own: one provider being down never hides the
    /// other's status. Total latency is bounded by the slower probe.
    pub async fn check_health(&self) -> HealthReport {
        let (primary, secondary) = futures::join!(self.probe(&self.primary), self.probe(&self.secondary));
        let report = HealthReport::from_results([primary, secondary]);

        let level = if report.is_healthy() { LogLevel::Info } else { LogLevel::Warn };
        self.logger.log(
            &LogRecord::new(level, "Health check completed")
                .with_field("status", report.status.as_str())
                .with_field(
                    format!("health.{}", self.primary.name()),
                    self.health_label(&report, self.primary.name()),
                )
                .with_field(
                    format!("health.{}", self.secondary.name()),
                    self.health_label(&report, self.secondary.name()),
                ),
        );
        report
    }

    /// Probe a single provider by name
    pub async fn check_provider_health(&self, provider: &str) -> FailoverResult<ProviderHealth> {
        let target = self.target(provider)?;
        Ok(self.probe(target).await)
    }

    fn health_label(&self, report: &HealthReport, provider: &str) -> &'static str {
        match report.provider(provider) {
            Some(h) if h.healthy => "up",
            _ => "down",
        }
    }

    async fn probe(&self, target: &ProviderTarget) -> ProviderHealth {
        let request = target.build_request(&target.config.health_path, HttpMethod::Get, None);
        let url = request.url.clone();
        let started = Instant::now();
        let result = self.transport.send(request).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                self.logger.log(
                    &LogRecord::new(LogLevel::Debug, "Health probe succeeded")
                        .with_field("provider", target.name())
                        .with_field("url", &url)
                        .with_field("latency_ms", latency_ms),
                );
                ProviderHealth::up(target.name(), response.status, response.body, latency_ms)
            }
            Err(error) => {
                self.logger.log(
                    &LogRecord::new(LogLevel::Warn, "Health probe failed")
                        .with_field("provider", target.name())
                        .with_field("url", &url)
                        .with_field("error", &error),
                );
                ProviderHealth::down(target.name(), error.status(), error.to_string(), latency_ms)
            }
        }
    }
}
