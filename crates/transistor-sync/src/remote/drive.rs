//! Google Drive backend
//!
//! Implementation of `RemoteStore` over the Drive v3 REST API
//! (<https://developers.google.com/drive/api/v3/reference>).

use crate::config::drive::{FILES_URL, LIST_FIELDS, UPLOAD_URL};
use crate::config::network::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Result, SyncError};

use super::store::RemoteStore;
use super::types::{FileQuery, RemoteEntry};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Boundary for multipart create uploads
const MULTIPART_BOUNDARY: &str = "transistor_sync_upload";

// =============================================================================
// Internal API wire types (serde)
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mime_type: String,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parents: Option<Vec<&'a str>>,
}

impl From<DriveFile> for RemoteEntry {
    fn from(f: DriveFile) -> Self {
        RemoteEntry {
            id: f.id,
            name: f.name,
            mime_type: f.mime_type,
        }
    }
}

// =============================================================================
// Query building
// =============================================================================

/// Escape a value for a Drive query string literal
fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Render a `FileQuery` as a Drive `q` expression
///
/// Trashed entries are always excluded.
fn build_query(query: &FileQuery) -> String {
    let mut clauses = Vec::new();

    if let Some(ref name) = query.name {
        clauses.push(format!("name='{}'", escape_query_value(name)));
    }
    if let Some(ref mime_type) = query.mime_type {
        clauses.push(format!("mimeType='{}'", escape_query_value(mime_type)));
    }
    if let Some(ref parent) = query.parent {
        clauses.push(format!("'{}' in parents", escape_query_value(parent)));
    }
    clauses.push("trashed=false".to_string());

    clauses.join(" and ")
}

// =============================================================================
// DriveClient
// =============================================================================

/// Authenticated Google Drive connection
///
/// One instance per `initialize` call; holds the bearer token and the shared
/// HTTP client with standard timeouts.
pub struct DriveClient {
    client: reqwest::blocking::Client,
    token: String,
    files_url: String,
    upload_url: String,
}

impl DriveClient {
    /// Create a client against the production endpoints
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_urls(access_token, FILES_URL, UPLOAD_URL)
    }

    /// Create a client with custom endpoints (for testing or mirrors)
    pub fn with_base_urls(
        access_token: impl Into<String>,
        files_url: impl Into<String>,
        upload_url: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            token: access_token.into(),
            files_url: files_url.into(),
            upload_url: upload_url.into(),
        })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Map a non-success response to `RemoteCall` with status and body
    fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(SyncError::RemoteCall(format!("{}: {}", status, body)))
    }

    /// Create a folder or an empty file: metadata-only POST
    fn create_metadata_only(
        &self,
        name: &str,
        parent: Option<&str>,
        mime_type: &str,
    ) -> Result<RemoteEntry> {
        let metadata = FileMetadata {
            name,
            mime_type: Some(mime_type),
            parents: parent.map(|p| vec![p]),
        };

        let response = self
            .client
            .post(&self.files_url)
            .query(&[("fields", "id,name,mimeType")])
            .header("Authorization", self.bearer())
            .json(&metadata)
            .send()?;

        let file: DriveFile = Self::check(response)?.json()?;
        Ok(file.into())
    }

    /// Create a file with content: multipart/related POST
    ///
    /// First part is the JSON metadata, second part the raw payload.
    fn create_with_content(
        &self,
        name: &str,
        parent: Option<&str>,
        mime_type: &str,
        content: &[u8],
    ) -> Result<RemoteEntry> {
        let metadata = FileMetadata {
            name,
            mime_type: None,
            parents: parent.map(|p| vec![p]),
        };
        let metadata_json = serde_json::to_string(&metadata)
            .map_err(|e| SyncError::RemoteCall(format!("Bad file metadata: {e}")))?;

        let mut body = format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n--{boundary}\r\nContent-Type: {mime}\r\n\r\n",
            boundary = MULTIPART_BOUNDARY,
            metadata = metadata_json,
            mime = mime_type,
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--", MULTIPART_BOUNDARY).as_bytes());

        let response = self
            .client
            .post(&self.upload_url)
            .query(&[("uploadType", "multipart"), ("fields", "id,name,mimeType")])
            .header("Authorization", self.bearer())
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(body)
            .send()?;

        let file: DriveFile = Self::check(response)?.json()?;
        Ok(file.into())
    }
}

impl RemoteStore for DriveClient {
    fn list(&self, query: &FileQuery) -> Result<Vec<RemoteEntry>> {
        let q = build_query(query);
        let response = self
            .client
            .get(&self.files_url)
            .query(&[("q", q.as_str()), ("spaces", "drive"), ("fields", LIST_FIELDS)])
            .header("Authorization", self.bearer())
            .send()?;

        let list: DriveFileList = Self::check(response)?.json()?;
        Ok(list.files.into_iter().map(RemoteEntry::from).collect())
    }

    fn create(
        &self,
        name: &str,
        parent: Option<&str>,
        mime_type: &str,
        content: Option<&[u8]>,
    ) -> Result<RemoteEntry> {
        match content {
            None => self.create_metadata_only(name, parent, mime_type),
            Some(content) => self.create_with_content(name, parent, mime_type, content),
        }
    }

    fn update(&self, id: &str, mime_type: &str, content: &[u8]) -> Result<RemoteEntry> {
        let url = format!("{}/{}", self.upload_url, id);
        let response = self
            .client
            .patch(&url)
            .query(&[("uploadType", "media"), ("fields", "id,name,mimeType")])
            .header("Authorization", self.bearer())
            .header("Content-Type", mime_type)
            .body(content.to_vec())
            .send()?;

        let file: DriveFile = Self::check(response)?.json()?;
        Ok(file.into())
    }

    fn download(&self, id: &str) -> Result<Vec<u8>> {
        let url = format!("{}/{}", self.files_url, id);
        let response = self
            .client
            .get(&url)
            .query(&[("alt", "media")])
            .header("Authorization", self.bearer())
            .send()?;

        let bytes = Self::check(response)?.bytes()?;
        Ok(bytes.to_vec())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::drive::FOLDER_MIME_TYPE;
    use crate::config::sync::{BACKUP_FILE, BACKUP_FOLDER};

    // ---- Query building ----

    #[test]
    fn test_build_query_name_only() {
        let q = FileQuery::new().name("stations.json");
        assert_eq!(build_query(&q), "name='stations.json' and trashed=false");
    }

    #[test]
    fn test_build_query_folder_lookup() {
        let q = FileQuery::new().name(BACKUP_FOLDER).mime_type(FOLDER_MIME_TYPE);
        assert_eq!(
            build_query(&q),
            "name='Transistor_Backup' and \
             mimeType='application/vnd.google-apps.folder' and trashed=false"
        );
    }

    #[test]
    fn test_build_query_file_in_folder() {
        let q = FileQuery::new().name(BACKUP_FILE).parent("folder-1");
        assert_eq!(
            build_query(&q),
            "name='stations.json' and 'folder-1' in parents and trashed=false"
        );
    }

    #[test]
    fn test_build_query_empty_still_excludes_trashed() {
        assert_eq!(build_query(&FileQuery::new()), "trashed=false");
    }

    #[test]
    fn test_query_value_escaping() {
        assert_eq!(escape_query_value("it's"), "it\\'s");
        assert_eq!(escape_query_value("a\\b"), "a\\\\b");

        let q = FileQuery::new().name("Bob's Radio");
        assert_eq!(build_query(&q), "name='Bob\\'s Radio' and trashed=false");
    }

    // ---- Wire type deserialization ----

    #[test]
    fn test_drive_file_list_deserialize() {
        let json = r#"{
            "files": [
                {"id": "id-1", "name": "Transistor_Backup",
                 "mimeType": "application/vnd.google-apps.folder"},
                {"id": "id-2", "name": "stations.json", "mimeType": "application/json"}
            ]
        }"#;
        let list: DriveFileList = serde_json::from_str(json).unwrap();
        assert_eq!(list.files.len(), 2);
        assert_eq!(list.files[0].id, "id-1");
        assert_eq!(list.files[1].mime_type, "application/json");
    }

    #[test]
    fn test_drive_file_list_deserialize_empty() {
        // Drive omits "files" entirely when nothing matches
        let list: DriveFileList = serde_json::from_str("{}").unwrap();
        assert!(list.files.is_empty());
    }

    #[test]
    fn test_drive_file_list_extra_fields_ignored() {
        let json = r#"{
            "kind": "drive#fileList",
            "incompleteSearch": false,
            "files": [{"id": "id-3", "name": "stations.json"}]
        }"#;
        let list: DriveFileList = serde_json::from_str(json).unwrap();
        assert_eq!(list.files.len(), 1);
        assert_eq!(list.files[0].mime_type, "");
    }

    #[test]
    fn test_drive_file_to_remote_entry() {
        let file = DriveFile {
            id: "id-9".to_string(),
            name: "stations.json".to_string(),
            mime_type: "application/json".to_string(),
        };
        let entry: RemoteEntry = file.into();
        assert_eq!(entry.id, "id-9");
        assert_eq!(entry.name, "stations.json");
        assert_eq!(entry.mime_type, "application/json");
    }

    #[test]
    fn test_metadata_serialization_skips_absent_fields() {
        let metadata = FileMetadata {
            name: "stations.json",
            mime_type: None,
            parents: Some(vec!["folder-1"]),
        };
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"name\":\"stations.json\""));
        assert!(json.contains("\"parents\":[\"folder-1\"]"));
        assert!(!json.contains("mimeType"));
    }

    // ---- Client construction ----

    #[test]
    fn test_client_creation() {
        let client = DriveClient::new("token");
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_custom_base_urls() {
        let client =
            DriveClient::with_base_urls("token", "http://localhost:8080/files", "http://localhost:8080/upload")
                .unwrap();
        assert_eq!(client.files_url, "http://localhost:8080/files");
        assert_eq!(client.upload_url, "http://localhost:8080/upload");
    }

    #[test]
    fn test_list_unreachable_host_is_error() {
        let client = DriveClient::with_base_urls(
            "token",
            "http://invalid.invalid.invalid/files",
            "http://invalid.invalid.invalid/upload",
        )
        .unwrap();
        let result = client.list(&FileQuery::new().name(BACKUP_FOLDER));
        assert!(result.is_err());
    }

    // ---- Integration tests (require a real token, marked #[ignore]) ----
    //
    // Run with: TRANSISTOR_SYNC_TOKEN=... cargo test -- --ignored

    #[test]
    #[ignore]
    fn test_integration_list_backup_folder() {
        let token = std::env::var("TRANSISTOR_SYNC_TOKEN").expect("TRANSISTOR_SYNC_TOKEN not set");
        let client = DriveClient::new(token).unwrap();
        let entries = client
            .list(&FileQuery::new().name(BACKUP_FOLDER).mime_type(FOLDER_MIME_TYPE))
            .unwrap();
        // Zero or one folder expected on a healthy account
        assert!(entries.len() <= 1);
    }

    #[test]
    #[ignore]
    fn test_integration_create_and_download() {
        let token = std::env::var("TRANSISTOR_SYNC_TOKEN").expect("TRANSISTOR_SYNC_TOKEN not set");
        let client = DriveClient::new(token).unwrap();
        let created = client
            .create("transistor_sync_it.json", None, "application/json", Some(b"[]"))
            .unwrap();
        let content = client.download(&created.id).unwrap();
        assert_eq!(content, b"[]");
    }
}
