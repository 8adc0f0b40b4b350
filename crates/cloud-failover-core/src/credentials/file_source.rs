//! JSON file credential source

use std::fs;
use std::path::{Path, PathBuf};

use super::traits::{CloudCredentials, CredentialSource, CredentialsError, CredentialsResult};

/// Reads credentials from a JSON file
///
/// The file maps provider names to credential objects:
///
/// ```json
/// {
///   "google": { "apiKey": "...", "projectId": "...", "region": "us-central1" },
///   "aws": { "accessKeyId": "...", "secretAccessKey": "...", "region": "us-east-1" }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileCredentialSource {
    path: PathBuf,
}

impl FileCredentialSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialSource for FileCredentialSource {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self) -> CredentialsResult<CloudCredentials> {
        let content = fs::read_to_string(&self.path)?;
        let credentials: CloudCredentials = serde_json::from_str(&content)?;
        if credentials.is_empty() {
            return Err(CredentialsError::Unavailable(format!(
                "{} lists no providers",
                self.path.display()
            )));
        }
        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_source_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("creds.json");
        fs::write(&path, r#"{ "google": { "apiKey": "from-file", "region": "us-west1" } }"#).unwrap();

        let source = FileCredentialSource::new(&path);
        assert_eq!(source.name(), "file");
        let creds = source.load().unwrap();
        assert_eq!(creds.google().unwrap().api_key.as_deref(), Some("from-file"));
        assert!(creds.aws().is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let source = FileCredentialSource::new(dir.path().join("missing.json"));
        assert!(matches!(source.load(), Err(CredentialsError::Io(_))));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("creds.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(FileCredentialSource::new(&path).load(), Err(CredentialsError::Parse(_))));
    }

    #[test]
    fn test_empty_object_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("creds.json");
        fs::write(&path, "{}").unwrap();
        assert!(matches!(
            FileCredentialSource::new(&path).load(),
            Err(CredentialsError::Unavailable(_))
        ));
    }
}
