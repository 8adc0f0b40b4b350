//! Request and response values passed between the service and a transport

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP verb for a provider request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }

    /// Whether a request body is sent for this verb
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            other => Err(format!("unsupported HTTP method: {}", other)),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

/// Username/password pair sent as HTTP basic auth
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: Option<String>,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A fully resolved outbound request for one provider attempt
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Name of the provider this request targets
    pub provider: String,
    pub method: HttpMethod,
    /// Absolute URL (provider base URL joined with the endpoint)
    pub url: String,
    /// Header name/value pairs, in insertion order
    pub headers: Vec<(String, String)>,
    /// Basic auth credentials; when set they replace any `Authorization` header
    pub basic_auth: Option<BasicAuth>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl ProviderRequest {
    /// Create a request with the JSON content type already set
    pub fn new(
        provider: impl Into<String>,
        method: HttpMethod,
        url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider: provider.into(),
            method,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            basic_auth: None,
            body: None,
            timeout,
        }
    }

    /// Attach a JSON body (ignored for verbs that carry none)
    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = if self.method.allows_body() { body } else { None };
        self
    }

    /// Set a header, replacing any existing header with the same name
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Successful response from a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Provider that served the response
    pub provider: String,
    pub status: u16,
    /// Parsed JSON body, or a JSON string when the body was not JSON
    pub body: Value,
}

impl ProviderResponse {
    pub fn new(provider: impl Into<String>, status: u16, body: Value) -> Self {
        Self {
            provider: provider.into(),
            status,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parsing() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("Delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
        assert!("TRACE".parse::<HttpMethod>().is_err());
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn test_body_dropped_for_get() {
        let req = ProviderRequest::new("google", HttpMethod::Get, "https://x/users", Duration::from_secs(1))
            .with_body(Some(json!({ "name": "ignored" })));
        assert!(req.body.is_none());

        let req = ProviderRequest::new("google", HttpMethod::Post, "https://x/users", Duration::from_secs(1))
            .with_body(Some(json!({ "name": "Test User" })));
        assert_eq!(req.body, Some(json!({ "name": "Test User" })));
    }

    #[test]
    fn test_set_header_replaces_case_insensitively() {
        let mut req = ProviderRequest::new("aws", HttpMethod::Get, "https://x", Duration::from_secs(1));
        assert_eq!(req.header("content-type"), Some("application/json"));

        req.set_header("authorization", "Bearer a");
        req.set_header("Authorization", "Bearer b");
        assert_eq!(req.header("AUTHORIZATION"), Some("Bearer b"));
        assert_eq!(req.headers.iter().filter(|(n, _)| n.eq_ignore_ascii_case("authorization")).count(), 1);
    }

    #[test]
    fn test_basic_auth_debug_redacts_password() {
        let auth = BasicAuth {
            username: "AKIA123".to_string(),
            password: Some("super-secret".to_string()),
        };
        let rendered = format!("{:?}", auth);
        assert!(rendered.contains("AKIA123"));
        assert!(!rendered.contains("super-secret"));
    }
}
