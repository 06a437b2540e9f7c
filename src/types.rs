//! Configuration and wire types for the v1.12 REST API

use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone)]
pub struct ArrayConfig {
    /// Array address; `https://` is assumed when no scheme is given
    pub host: String,
    /// Username for API token exchange
    pub username: Option<String>,
    /// Password for API token exchange
    pub password: Option<String>,
    /// Pre-provisioned API token
    pub api_token: Option<String>,
    /// Verify the array's TLS certificate (default: true)
    pub verify_tls: bool,
    /// REST API version segment (default: "1.12")
    pub api_version: String,
    /// Timeout for token and session calls in seconds (default: 10).
    /// Kept short so authentication fails fast on unreachable hosts.
    pub auth_timeout_secs: u64,
    /// Timeout for data calls in seconds (default: 60)
    pub request_timeout_secs: u64,
    /// Idle window after which the session is re-established (default: 1800)
    pub session_idle_secs: u64,
    /// Maximum concurrent in-flight requests (default: 10)
    pub max_in_flight: usize,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            username: None,
            password: None,
            api_token: None,
            verify_tls: true,
            api_version: "1.12".to_string(),
            auth_timeout_secs: 10,
            request_timeout_secs: 60,
            session_idle_secs: 1800,
            max_in_flight: 10,
        }
    }
}

impl ArrayConfig {
    /// Disable TLS certificate verification (arrays with self-signed certs)
    pub fn insecure(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Base URL for API calls: `scheme://host/api/{version}/`
    pub(crate) fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}/api/{}/", host, self.api_version)
        } else {
            format!("https://{}/api/{}/", host, self.api_version)
        }
    }
}

/// Response from `POST auth/apitoken`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiTokenResponse {
    pub api_token: Option<String>,
}

/// Response from `POST auth/session`
#[derive(Debug, Deserialize)]
pub(crate) struct SessionResponse {
    pub username: Option<String>,
}

/// Array identity and firmware info from `GET array`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayInfo {
    /// Array display name
    pub array_name: String,
    /// Array ID
    pub id: String,
    /// Firmware revision
    #[serde(default)]
    pub revision: Option<String>,
    /// REST API version serving this response
    pub version: String,
}

/// Volume metadata from `GET volume`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeInfo {
    /// Volume name
    pub name: String,
    /// Provisioned size in bytes
    pub size: u64,
    /// Volume serial number
    pub serial: String,
    /// Creation timestamp (ISO 8601)
    #[serde(default)]
    pub created: Option<String>,
    /// Source volume when this is a copy
    #[serde(default)]
    pub source: Option<String>,
}
