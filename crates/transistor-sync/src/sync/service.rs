//! Sync service
//!
//! Owns the authenticated connection and runs the three-step dance behind
//! every sync: resolve the backup folder, resolve the backup file, transfer.
//! The connection lives behind a mutex so concurrent `initialize` calls are
//! serialized; operations clone the handle out and release the lock before
//! touching the network.

use crate::auth::SessionStore;
use crate::config::drive::{BACKUP_MIME_TYPE, FOLDER_MIME_TYPE};
use crate::config::sync::{BACKUP_FILE, BACKUP_FOLDER};
use crate::data::Station;
use crate::error::{Result, SyncError};
use crate::remote::{DriveClient, FileQuery, RemoteStore};

use std::sync::{Arc, Mutex};
use tracing::info;

/// Backs the station list up to the remote drive and restores it
pub struct SyncService {
    session: SessionStore,
    connection: Mutex<Option<Arc<dyn RemoteStore>>>,
}

impl SyncService {
    /// Create a service with no connection yet
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            connection: Mutex::new(None),
        }
    }

    /// The session store this service consults
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Build the authenticated connection from the cached session
    ///
    /// Fails with `NotAuthenticated` when no session is cached, leaving no
    /// connection behind. Idempotent: each call rebuilds the connection, and
    /// calls racing each other are serialized by the connection lock.
    pub fn initialize(&self) -> Result<()> {
        let session = self.session.session().ok_or(SyncError::NotAuthenticated)?;

        let client = DriveClient::new(session.access_token.as_str())
            .map_err(|e| SyncError::ConnectionFailed(e.to_string()))?;

        let mut connection = self.connection.lock().expect("connection lock poisoned");
        *connection = Some(Arc::new(client));
        info!("Drive connection initialized for {}", session.email);
        Ok(())
    }

    /// Use an already-built store as the connection (tests, mirrors)
    pub fn connect_with(&self, store: Arc<dyn RemoteStore>) {
        let mut connection = self.connection.lock().expect("connection lock poisoned");
        *connection = Some(store);
    }

    /// Whether a connection is currently held
    pub fn is_connected(&self) -> bool {
        self.connection
            .lock()
            .expect("connection lock poisoned")
            .is_some()
    }

    /// Clone the connection handle out of the lock
    fn connection(&self) -> Result<Arc<dyn RemoteStore>> {
        self.connection
            .lock()
            .expect("connection lock poisoned")
            .clone()
            .ok_or_else(|| {
                SyncError::ConnectionFailed("No connection — call initialize first".to_string())
            })
    }

    /// Resolve the backup folder, creating it on first use
    ///
    /// The first match wins when duplicates exist. Before creating, the
    /// lookup runs once more so a folder another device made in the meantime
    /// is adopted as canonical instead of duplicated. Two truly simultaneous
    /// first-time writers can still each create a folder; the first match
    /// then shadows the other on every later sync.
    fn ensure_backup_folder(&self, store: &dyn RemoteStore) -> Result<String> {
        let query = FileQuery::new()
            .name(BACKUP_FOLDER)
            .mime_type(FOLDER_MIME_TYPE);

        if let Some(folder) = store.list(&query)?.into_iter().next() {
            return Ok(folder.id);
        }

        if let Some(folder) = store.list(&query)?.into_iter().next() {
            return Ok(folder.id);
        }

        let folder = store.create(BACKUP_FOLDER, None, FOLDER_MIME_TYPE, None)?;
        info!("Created backup folder {}", folder.id);
        Ok(folder.id)
    }

    /// Upload the station list, replacing any previous backup
    ///
    /// The payload is a bare JSON array of stations. An existing backup file
    /// is overwritten in place (same id); otherwise one is created under the
    /// backup folder. Any failure aborts the whole call — a folder created
    /// along the way is not rolled back.
    pub fn upload_stations(&self, stations: &[Station]) -> Result<()> {
        let store = self.connection()?;
        let folder_id = self.ensure_backup_folder(store.as_ref())?;

        let payload = serde_json::to_vec(stations)
            .map_err(|e| SyncError::Decode(format!("Failed to serialize station list: {e}")))?;

        let existing = store
            .list(&FileQuery::new().name(BACKUP_FILE).parent(folder_id.as_str()))?
            .into_iter()
            .next();

        match existing {
            Some(file) => {
                store.update(&file.id, BACKUP_MIME_TYPE, &payload)?;
            }
            None => {
                store.create(
                    BACKUP_FILE,
                    Some(folder_id.as_str()),
                    BACKUP_MIME_TYPE,
                    Some(&payload),
                )?;
            }
        }

        info!("Uploaded {} stations", stations.len());
        Ok(())
    }

    /// Download the backed-up station list
    ///
    /// Returns an empty list when the folder is reachable but holds no
    /// backup yet — distinct from the errors raised when the connection is
    /// missing, a remote call fails, or the backup content does not decode
    /// as a station list.
    pub fn download_stations(&self) -> Result<Vec<Station>> {
        let store = self.connection()?;
        let folder_id = self.ensure_backup_folder(store.as_ref())?;

        let file = store
            .list(&FileQuery::new().name(BACKUP_FILE).parent(folder_id.as_str()))?
            .into_iter()
            .next();

        let Some(file) = file else {
            info!("No backup file found");
            return Ok(Vec::new());
        };

        let bytes = store.download(&file.id)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| SyncError::Decode(format!("Backup file is not UTF-8: {e}")))?;
        let stations: Vec<Station> = serde_json::from_str(&text)
            .map_err(|e| SyncError::Decode(format!("Backup file is not a station list: {e}")))?;

        info!("Downloaded {} stations", stations.len());
        Ok(stations)
    }
}

// =============================================================================
// Tests
// =============================================================================
