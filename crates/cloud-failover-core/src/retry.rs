//! Per-provider retry policy
//!
//! One policy is applied uniformly to both providers. The default makes a
//! single attempt per provider, so a failed primary costs exactly one call
//! before failover.

use std::time::Duration;

use crate::config::ProviderConfig;

/// Delay between consecutive attempts against the same provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// Retry immediately
    #[default]
    None,
    /// Same delay before every retry
    Fixed(Duration),
    /// `initial * 2^(retry - 1)`, capped at `max`
    Exponential { initial: Duration, max: Duration },
}

impl Backoff {
    /// Delay before retry number `retry` (1-based: the first retry is 1)
    pub fn delay_for(&self, retry: u32) -> Duration {
        match *self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { initial, max } => {
                let shift = retry.saturating_sub(1).min(31);
                initial.saturating_mul(1u32 << shift).min(max)
            }
        }
    }
}

/// How many attempts each provider gets, and how long to wait between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

impl RetryPolicy {
    /// `max_attempts` is clamped to at least one
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// One attempt, no retries
    pub fn single_attempt() -> Self {
        Self::new(1, Backoff::None)
    }

    /// Use a provider's configured `retry_attempts` and fixed `retry_delay`
    pub fn from_provider(config: &ProviderConfig) -> Self {
        Self::new(config.retry_attempts, Backoff::Fixed(config.retry_delay))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Delay to wait after failed attempt `attempt` (1-based), or `None` when no attempts remain
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        (attempt < self.max_attempts).then(|| self.backoff.delay_for(attempt))
    }
}
