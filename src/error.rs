//! Error types for the array client

use thiserror::Error;

/// Array client error
#[derive(Debug, Error)]
pub enum ArrayError {
    /// No API token and no username to exchange for one
    #[error("no API token and no username available to acquire one")]
    NoCredentials,

    /// Token exchange was answered but did not yield a token
    #[error("API token exchange failed: {body}")]
    TokenAcquisition { body: String },

    /// Session endpoint answered but returned no identity
    #[error("session rejected by array: {body}")]
    SessionRejected { body: String },

    /// Network, DNS or TLS failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not valid JSON for the expected shape
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Non-200, non-401 response; retrying cannot fix these
    #[error("array returned {status}: {body}")]
    Api { status: u16, body: String },

    /// 401 retry budget exhausted
    #[error("retries exhausted, last response {status}: {body}")]
    MaxRetries { status: u16, body: String },

    /// Invariant violation inside the client
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for array operations
pub type Result<T> = std::result::Result<T, ArrayError>;
