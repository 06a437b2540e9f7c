//! Array client: admission gate, call dispatch with bounded retry, and
//! typed endpoint wrappers

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, Semaphore};
use tracing::warn;

use crate::error::{ArrayError, Result};
use crate::session::SessionState;
use crate::transport::{RawResponse, Transport};
use crate::types::{ArrayConfig, ArrayInfo, VolumeInfo};

/// Attempts per call: the initial request plus one retry after a 401
const MAX_ATTEMPTS: usize = 2;

/// Async client for the array REST API
///
/// # Example
///
/// ```rust,no_run
/// use flasharray_client::{ArrayClient, ArrayConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ArrayClient::new(ArrayConfig {
///     host: "10.0.1.20".into(),
///     api_token: Some("ca65b5bb-66d3-9420-e4dc-ea67ef2e509d".into()),
///     ..Default::default()
/// });
///
/// let array = client.get_array().await?;
/// println!("connected to {}", array.array_name);
/// # Ok(())
/// # }
/// ```
pub struct ArrayClient {
    pub(crate) config: ArrayConfig,
    pub(crate) transport: Transport,
    pub(crate) session: Mutex<SessionState>,
    /// Admission gate bounding concurrent in-flight requests
    gate: Semaphore,
}

impl ArrayClient {
    /// Create a client from a full configuration.
    ///
    /// No session is started here; the first call (or an explicit
    /// [`start_session`](Self::start_session)) establishes it.
    pub fn new(config: ArrayConfig) -> Self {
        let transport = Transport::new(&config);
        let session = Mutex::new(SessionState::new(config.api_token.clone()));
        let gate = Semaphore::new(config.max_in_flight);

        Self {
            config,
            transport,
            session,
            gate,
        }
    }

    /// Client authenticating with a username/password pair
    pub fn with_credentials(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(ArrayConfig {
            host: host.into(),
            username: Some(username.into()),
            password: Some(password.into()),
            ..Default::default()
        })
    }

    /// Client authenticating with a pre-provisioned API token
    pub fn with_api_token(host: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self::new(ArrayConfig {
            host: host.into(),
            api_token: Some(api_token.into()),
            ..Default::default()
        })
    }

    // ==================== Typed endpoints ====================

    /// Array identity and firmware info
    pub async fn get_array(&self) -> Result<ArrayInfo> {
        self.call(Method::GET, "array", None).await
    }

    /// List all volumes on the array
    pub async fn list_volumes(&self) -> Result<Vec<VolumeInfo>> {
        self.call(Method::GET, "volume", None).await
    }

    /// A single volume by name
    pub async fn get_volume(&self, name: &str) -> Result<VolumeInfo> {
        let path = format!("volume/{}", urlencoding::encode(name));
        self.call(Method::GET, &path, None).await
    }

    /// Establish the session eagerly instead of on the first call
    pub async fn start_session(&self) -> Result<()> {
        self.restart_session().await
    }

    /// Free admission slots (diagnostic)
    pub fn available_slots(&self) -> usize {
        self.gate.available_permits()
    }

    // ==================== Dispatch ====================

    /// Dispatch one API call: admission gate, session check, bounded
    /// retry on 401. All other non-200 statuses fail without retry.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        // Permit is scoped; released on every exit path
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| ArrayError::Internal("admission gate closed".into()))?;

        self.ensure_session().await?;

        let timeout = Duration::from_secs(self.config.request_timeout_secs);
        let mut last: Option<RawResponse> = None;

        for attempt in 0..MAX_ATTEMPTS {
            let resp = self
                .transport
                .send(method.clone(), path, body.as_ref(), timeout)
                .await?;

            match resp.status {
                200 => return resp.decode(),
                401 => {
                    last = Some(resp);
                    if attempt + 1 < MAX_ATTEMPTS {
                        warn!(%path, "unauthorized, restarting session and retrying");
                        self.restart_session().await?;
                    }
                }
                status => {
                    return Err(ArrayError::Api {
                        status,
                        body: resp.body,
                    })
                }
            }
        }

        // Every attempt came back 401
        match last {
            Some(resp) => Err(ArrayError::MaxRetries {
                status: resp.status,
                body: resp.body,
            }),
            None => Err(ArrayError::Internal(
                "retry loop exited without a response".into(),
            )),
        }
    }
}
