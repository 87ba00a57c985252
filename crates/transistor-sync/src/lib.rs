//! Transistor Sync
//!
//! Backs up a radio-station list to a folder in the user's cloud drive and
//! restores it on another device. Station data lives in `data`, the cached
//! sign-in session in `auth`, the storage backend behind the `remote` trait,
//! and the backup/restore orchestration in `sync`.

pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod remote;
pub mod sync;

// Re-export the types most callers need
pub use auth::SessionStore;
pub use data::{Station, StationCollection};
pub use error::{Result, SyncError};
pub use sync::SyncService;
