//! Remote store trait
//!
//! Defines the interface the sync layer requires from a storage backend.

use crate::error::Result;

use super::types::{FileQuery, RemoteEntry};

/// A remote file store
///
/// Four operations cover everything the sync layer does: look entries up,
/// create them (a folder when the mime type is the backend's folder marker
/// and `content` is `None`), replace an entry's content, and read it back.
pub trait RemoteStore: Send + Sync {
    /// List non-trashed entries matching the query
    fn list(&self, query: &FileQuery) -> Result<Vec<RemoteEntry>>;

    /// Create an entry, optionally parented and optionally with content
    fn create(
        &self,
        name: &str,
        parent: Option<&str>,
        mime_type: &str,
        content: Option<&[u8]>,
    ) -> Result<RemoteEntry>;

    /// Replace an entry's content in place, keeping its id and name
    fn update(&self, id: &str, mime_type: &str, content: &[u8]) -> Result<RemoteEntry>;

    /// Read an entry's full content into memory
    fn download(&self, id: &str) -> Result<Vec<u8>>;
}
