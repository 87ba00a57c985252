//! Error types for Transistor Sync
//!
//! Centralized error handling using thiserror. Every failure cause gets its
//! own variant so callers can tell "not signed in" from "backend unreachable"
//! from "backup file is garbage" instead of collapsing them into a boolean.

use thiserror::Error;

/// Main error type for Transistor Sync
#[derive(Error, Debug)]
pub enum SyncError {
    /// No signed-in session is cached; no remote call was attempted.
    #[error("Not signed in")]
    NotAuthenticated,

    /// No authenticated connection is available, or building one failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("{}", friendly_network_error(.0))]
    Network(#[from] reqwest::Error),

    /// The backend accepted the request but answered with an error status.
    #[error("Remote call failed: {0}")]
    RemoteCall(String),

    /// The backup payload could not be decoded as a station list.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Local file problem (session cache, station collection).
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for Transistor Sync
pub type Result<T> = std::result::Result<T, SyncError>;

fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_connect() {
        let host = e.url().and_then(|u| u.host_str().map(str::to_string));
        return format!(
            "Could not connect to {}",
            host.as_deref().unwrap_or("server")
        );
    }
    if e.is_timeout() {
        return "Connection timed out".to_string();
    }
    if e.is_decode() {
        return "Invalid response from server".to_string();
    }
    format!("Network error: {e}")
}
