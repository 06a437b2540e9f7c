//! Session lifecycle: token exchange, session start, idle tracking
//!
//! All mutation of [`SessionState`] happens behind one async mutex, so a
//! burst of concurrent callers triggers at most one real session start;
//! the rest block on the lock and then observe the started session.

use std::time::{Duration, Instant};

use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::client::ArrayClient;
use crate::error::{ArrayError, Result};
use crate::transport::RawResponse;
use crate::types::{ApiTokenResponse, SessionResponse};

/// Mutable authentication state, owned by the session lock
#[derive(Debug)]
pub(crate) struct SessionState {
    /// Current API token; refreshed via credentials when rejected
    pub api_token: Option<String>,
    /// Whether a session is currently established
    pub started: bool,
    /// When the session was last used by a call
    pub last_used: Option<Instant>,
}

impl SessionState {
    pub fn new(api_token: Option<String>) -> Self {
        Self {
            api_token,
            started: false,
            last_used: None,
        }
    }

    /// Whether the idle window has elapsed since the previous use
    fn idle_expired(&self, idle_secs: u64) -> bool {
        match self.last_used {
            Some(last) => last.elapsed() > Duration::from_secs(idle_secs),
            None => true,
        }
    }
}

impl ArrayClient {
    /// Validate the session before an API call, starting one if needed
    pub(crate) async fn ensure_session(&self) -> Result<()> {
        let mut state = self.session.lock().await;

        let stale = !state.started || state.idle_expired(self.config.session_idle_secs);
        state.last_used = Some(Instant::now());

        if stale {
            self.start_session_locked(&mut state).await?;
        }
        Ok(())
    }

    /// Drop the current session and establish a fresh one (401 recovery)
    pub(crate) async fn restart_session(&self) -> Result<()> {
        let mut state = self.session.lock().await;
        state.started = false;
        state.last_used = Some(Instant::now());
        self.start_session_locked(&mut state).await
    }

    /// Session-start sequence. Caller must hold the session lock.
    async fn start_session_locked(&self, state: &mut SessionState) -> Result<()> {
        debug!("starting array session");
        state.started = false;

        if state.api_token.is_none() {
            self.acquire_token_locked(state).await?;
        }
        let token = state.api_token.clone().ok_or(ArrayError::NoCredentials)?;

        let mut resp = self.post_auth("auth/session", json!({ "api_token": token })).await?;

        if resp.status == 400 {
            // Bad token; fall back to the credential pair exactly once.
            warn!("array rejected API token, re-acquiring via credentials");
            self.acquire_token_locked(state).await?;
            let token = state.api_token.clone().ok_or(ArrayError::NoCredentials)?;
            resp = self.post_auth("auth/session", json!({ "api_token": token })).await?;
        }

        let identity = if resp.status == 200 {
            resp.decode::<SessionResponse>().ok().and_then(|s| s.username)
        } else {
            None
        };
        let username = match identity {
            Some(username) => username,
            None => return Err(ArrayError::SessionRejected { body: resp.body }),
        };

        info!(%username, "array session established");
        state.started = true;
        Ok(())
    }

    /// Exchange username/password for an API token. Caller must hold the
    /// session lock.
    async fn acquire_token_locked(&self, state: &mut SessionState) -> Result<()> {
        let username = match self.config.username.as_deref() {
            Some(u) if !u.is_empty() => u,
            _ => return Err(ArrayError::NoCredentials),
        };
        let password = self.config.password.as_deref().unwrap_or("");
        debug!(%username, "requesting new API token");

        let resp = self
            .post_auth(
                "auth/apitoken",
                json!({ "username": username, "password": password }),
            )
            .await?;

        if resp.status != 200 {
            return Err(ArrayError::TokenAcquisition { body: resp.body });
        }
        let token = resp
            .decode::<ApiTokenResponse>()
            .ok()
            .and_then(|t| t.api_token)
            .filter(|t| !t.is_empty());
        let token = match token {
            Some(token) => token,
            None => return Err(ArrayError::TokenAcquisition { body: resp.body }),
        };

        debug!("received API token");
        state.api_token = Some(token);
        Ok(())
    }

    /// Auth-plane POST with the short timeout, so an unreachable array
    /// fails fast instead of hanging for the full data-call timeout.
    async fn post_auth(&self, path: &str, body: serde_json::Value) -> Result<RawResponse> {
        self.transport
            .send(
                Method::POST,
                path,
                Some(&body),
                Duration::from_secs(self.config.auth_timeout_secs),
            )
            .await
    }
}
