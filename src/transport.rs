//! Single-request HTTP layer
//!
//! Issues exactly one request per call and reads the whole body; retry
//! policy lives in the dispatcher, never here. Decoding is a separate step
//! so a JSON failure is distinguishable from a transport failure.

use std::time::Duration;

use reqwest::{header, Method};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ArrayError, Result};
use crate::types::ArrayConfig;

/// Raw result of one HTTP exchange
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub method: Method,
    pub path: String,
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Decode the body as JSON into the expected shape
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|source| ArrayError::Decode {
            path: format!("{} {}", self.method, self.path),
            source,
        })
    }
}

/// HTTP transport bound to one array
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
}

impl Transport {
    /// Build the transport for an array. The cookie store carries the
    /// session cookie; TLS verification is per-client, never a process
    /// global.
    pub fn new(config: &ArrayConfig) -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: config.base_url(),
        }
    }

    /// Issue one request with the supplied per-request timeout
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        timeout: Duration,
    ) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "array API request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(timeout);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse {
            method,
            path: path.to_string(),
            status,
            body,
        })
    }
}
