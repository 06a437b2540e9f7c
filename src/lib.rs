//! Rust client for the FlashArray REST API (v1.x)
//!
//! Handles API token exchange, cookie-backed session lifecycle,
//! re-authentication on 401 and bounded request concurrency, so callers
//! only deal with typed calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use flasharray_client::ArrayClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArrayClient::with_credentials("10.0.1.20", "pureuser", "pureuser");
//!
//! // Session starts lazily on the first call
//! let array = client.get_array().await?;
//! println!("{} running {}", array.array_name, array.version);
//!
//! for vol in client.list_volumes().await? {
//!     println!("{}: {} bytes", vol.name, vol.size);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
mod session;
mod transport;
pub mod types;

// Re-export main types
pub use client::ArrayClient;
pub use error::{ArrayError, Result};
pub use types::{ArrayConfig, ArrayInfo, VolumeInfo};
