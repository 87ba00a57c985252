//! Station collection
//!
//! The in-memory station list, kept in the order the user arranged it.
//! Backups serialize this order and restores replace it wholesale, so the
//! collection is a `Vec` rather than a map; URL-hash IDs are only used to
//! reject duplicates on add.

use crate::config::app::STATIONS_FILE;
use crate::data::storage;
use crate::data::types::{url_to_id, Station};
use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Collection file format version for migrations
const COLLECTION_VERSION: u32 = 1;

/// On-disk collection file structure
///
/// Only the local file carries this envelope. The remote backup payload is
/// the bare station array.
#[derive(Debug, Serialize, Deserialize)]
struct CollectionFile {
    version: u32,
    stations: Vec<Station>,
}

/// Manages the station list in memory
pub struct StationCollection {
    stations: Vec<Station>,
    /// Whether there are unsaved changes
    dirty: bool,
}

impl StationCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self {
            stations: Vec::new(),
            dirty: false,
        }
    }

    /// Load the collection from the default storage location
    pub fn load() -> Result<Self> {
        let path = storage::data_path(STATIONS_FILE)?;
        Self::load_from(&path)
    }

    /// Load the collection from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let stations = match storage::load_from::<CollectionFile>(path)? {
            // TODO: Handle version migrations when COLLECTION_VERSION increases
            Some(file) => file.stations,
            None => Vec::new(),
        };

        Ok(Self {
            stations,
            dirty: false,
        })
    }

    /// Save the collection to the default storage location
    pub fn save(&mut self) -> Result<()> {
        let path = storage::data_path(STATIONS_FILE)?;
        self.save_to(&path)
    }

    /// Save the collection to a specific path
    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let file = CollectionFile {
            version: COLLECTION_VERSION,
            stations: self.stations.clone(),
        };

        storage::save_to(path, &file)?;
        self.dirty = false;
        Ok(())
    }

    /// Check if there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Add a station to the end of the list
    ///
    /// Rejects a second station with the same stream URL.
    pub fn add(&mut self, station: Station) -> Result<()> {
        let id = station.id();
        if self.stations.iter().any(|s| s.id() == id) {
            return Err(SyncError::Storage(format!(
                "A station with URL '{}' already exists",
                station.url
            )));
        }

        self.stations.push(station);
        self.dirty = true;
        Ok(())
    }

    /// Remove a station by its stream URL
    pub fn remove_by_url(&mut self, url: &str) -> Result<Station> {
        let id = url_to_id(url);
        let pos = self
            .stations
            .iter()
            .position(|s| s.id() == id)
            .ok_or_else(|| SyncError::Storage(format!("No station with URL '{}'", url)))?;

        self.dirty = true;
        Ok(self.stations.remove(pos))
    }

    /// Replace the entire list (restore from backup)
    pub fn replace_all(&mut self, stations: Vec<Station>) {
        self.stations = stations;
        self.dirty = true;
    }

    /// The stations, in list order
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for StationCollection {
    fn default() -> Self {
        Self::new()
    }
}
