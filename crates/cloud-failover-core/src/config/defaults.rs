//! Default values and environment variable names

use std::time::Duration;

pub const PRIMARY_PROVIDER: &str = "google";
pub const SECONDARY_PROVIDER: &str = "aws";

pub const DEFAULT_PRIMARY_URL: &str = "https://gcp-api.ehb.com";
pub const DEFAULT_SECONDARY_URL: &str = "https://aws-api.ehb.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_HEALTH_PATH: &str = "/health";

pub const DEFAULT_GOOGLE_REGION: &str = "us-central1";
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Relative to the process working directory
pub const DEFAULT_CREDENTIALS_PATH: &str = "config/cloud-credentials.json";
pub const DEFAULT_LOG_FILE: &str = "logs/cloud-failover.log";

pub const ENV_PRIMARY_URL: &str = "GCP_DB_API";
pub const ENV_SECONDARY_URL: &str = "AWS_DB_API";
pub const ENV_LOG_LEVEL: &str = "CLOUD_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "CLOUD_LOG_FILE";
pub const ENV_CREDENTIALS_FILE: &str = "CLOUD_CREDENTIALS_FILE";
