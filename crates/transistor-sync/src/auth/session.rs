//! Cached sign-in session
//!
//! `SessionStore` wraps the session file on disk: whether a user is signed
//! in, the launchable consent request, and sign-out. A session is "valid"
//! here if it is cached and parses — token expiry is not checked up front
//! and surfaces as the failure of the next remote call instead.

use crate::config::auth::{AUTH_URL, SCOPE_DRIVE_FILE, SCOPE_EMAIL, SESSION_FILE};
use crate::data::storage;
use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A completed sign-in, as produced by the external consent flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Account email, for display only
    pub email: String,
    /// Bearer token scoped to drive file access
    pub access_token: String,
    /// Token type reported by the consent flow
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Session {
    pub fn new(email: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            access_token: access_token.into(),
            token_type: default_token_type(),
        }
    }
}

/// An opaque launchable sign-in request
///
/// Holds the consent URL requesting drive file access and the account
/// email. Launching it (opening the URL in a browser) starts a consent
/// flow outside this crate's control.
#[derive(Debug, Clone)]
pub struct SignInRequest {
    url: String,
}

impl SignInRequest {
    /// The consent URL to open
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Access to the cached sign-in session
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by the default config directory
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: storage::data_path(SESSION_FILE)?,
        })
    }

    /// Store backed by a specific file (for testing)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True iff a previously-completed sign-in is cached
    pub fn is_signed_in(&self) -> bool {
        self.session().is_some()
    }

    /// The cached session, if any
    ///
    /// A file that is missing or does not parse counts as "not signed in";
    /// no error is surfaced, matching the yes/no contract of the session
    /// check.
    pub fn session(&self) -> Option<Session> {
        storage::load_from::<Session>(&self.path).ok().flatten()
    }

    /// Best-effort display identity of the signed-in account
    pub fn account_email(&self) -> Option<String> {
        self.session().map(|s| s.email)
    }

    /// Build the launchable consent request for the given OAuth client
    ///
    /// Requests drive file access plus the account email.
    pub fn sign_in_request(&self, client_id: &str) -> Result<SignInRequest> {
        let scope = format!("{} {}", SCOPE_DRIVE_FILE, SCOPE_EMAIL);
        let url = reqwest::Url::parse_with_params(
            AUTH_URL,
            &[
                ("client_id", client_id),
                ("response_type", "token"),
                ("scope", scope.as_str()),
            ],
        )
        .map_err(|e| SyncError::ConnectionFailed(format!("Failed to build consent URL: {e}")))?;

        Ok(SignInRequest {
            url: url.to_string(),
        })
    }

    /// Persist the session the consent flow produced
    pub fn complete_sign_in(&self, session: &Session) -> Result<()> {
        storage::save_to(&self.path, session)
    }

    /// Remove the cached session
    ///
    /// Succeeds when no session exists; signing out twice is fine.
    pub fn sign_out(&self) -> Result<()> {
        storage::delete_at(&self.path)
    }
}
