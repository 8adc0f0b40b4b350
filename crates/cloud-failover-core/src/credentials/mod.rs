//! Provider credential resolution
//!
//! Credentials are resolved once, at service construction:
//! - `FileCredentialSource`: a JSON file shaped `{ "google": {...}, "aws": {...} }`
//! - `EnvCredentialSource`: `GCP_*` / `AWS_*` environment variables
//!
//! `CredentialsLoader` tries sources in order and never fails; the file wins
//! when it can be read and parsed.

mod traits;
mod file_source;
mod env_source;
mod loader;

pub use traits::{Credentials, CloudCredentials, CredentialSource, CredentialsError, CredentialsResult};
pub use file_source::FileCredentialSource;
pub use env_source::EnvCredentialSource;
pub use loader::{CredentialsLoader, ResolvedCredentials, load_credentials};
