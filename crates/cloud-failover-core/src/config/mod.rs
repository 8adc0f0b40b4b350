//! Configuration for the failover service
//!
//! Supports two sources:
//! - Environment variables (`FailoverConfig::from_env`)
//! - A YAML file (`FailoverConfig::from_yaml_file`)
//!
//! Both are validated before use and are immutable once the service is built.

mod error;
mod defaults;
mod provider;
mod failover;

pub use error::{ConfigError, ConfigResult};
pub use defaults::*;
pub use provider::{ProviderConfig, AuthScheme};
pub use failover::{FailoverConfig, LoggingConfig};
