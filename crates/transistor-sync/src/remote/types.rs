//! Remote storage types
//!
//! Backend-neutral view of a stored entry and the lookup filters.

/// A file or folder in the remote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Opaque backend id
    pub id: String,
    /// Display name
    pub name: String,
    /// Mime type; folders carry the backend's folder marker
    pub mime_type: String,
}

/// Filters for a lookup
///
/// Every clause is optional; trashed entries are always excluded.
#[derive(Debug, Default, Clone)]
pub struct FileQuery {
    /// Exact name match
    pub name: Option<String>,
    /// Exact mime type match
    pub mime_type: Option<String>,
    /// Id of the containing folder
    pub parent: Option<String>,
}

impl FileQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}
