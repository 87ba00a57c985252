//! Station record
//!
//! The unit of everything this crate backs up. The sync layer treats it as
//! an opaque serializable record; only the local collection looks inside.

use serde::{Deserialize, Serialize};
use std::hash::{DefaultHasher, Hash, Hasher};

/// Generate a deterministic ID from a URL
///
/// Using URL hash as ID provides:
/// - Deterministic: same URL always produces same ID
/// - Fast deduplication: check if ID exists without scanning
/// - Stable: ID doesn't change across sessions
pub fn url_to_id(url: &str) -> String {
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// A radio station with its metadata
///
/// Serialized as one element of the backup's JSON array. Optional fields
/// are omitted when absent, and unknown fields from older or newer backups
/// are ignored on input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    /// Display name
    pub name: String,
    /// Stream URL
    pub url: String,
    /// Logo/favicon URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Station homepage URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Audio codec (e.g., "MP3", "AAC", "OGG")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    /// Bitrate in kbps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
}

impl Station {
    /// Create a new station with minimal info
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            logo_url: None,
            homepage: None,
            codec: None,
            bitrate: None,
        }
    }

    /// Get the deterministic ID for this station (based on URL hash)
    pub fn id(&self) -> String {
        url_to_id(&self.url)
    }

    /// Create with logo URL
    pub fn with_logo(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }

    /// Set homepage
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    /// Set audio info
    pub fn with_audio_info(mut self, codec: Option<String>, bitrate: Option<u32>) -> Self {
        self.codec = codec;
        self.bitrate = bitrate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_creation() {
        let station = Station::new("Test Radio", "http://example.com/stream");
        assert_eq!(station.name, "Test Radio");
        assert_eq!(station.url, "http://example.com/stream");
        assert!(!station.id().is_empty());
    }

    #[test]
    fn test_station_id_deterministic() {
        let station1 = Station::new("Radio 1", "http://example.com/stream");
        let station2 = Station::new("Radio 2", "http://example.com/stream");
        // Same URL = same ID, regardless of name
        assert_eq!(station1.id(), station2.id());
    }

    #[test]
    fn test_station_builder() {
        let station = Station::new("Test", "http://test.com")
            .with_logo("http://test.com/logo.png")
            .with_audio_info(Some("MP3".to_string()), Some(128))
            .with_homepage("http://test.com");

        assert_eq!(station.logo_url, Some("http://test.com/logo.png".to_string()));
        assert_eq!(station.codec, Some("MP3".to_string()));
        assert_eq!(station.bitrate, Some(128));
        assert_eq!(station.homepage, Some("http://test.com".to_string()));
    }

    #[test]
    fn test_serialize_skips_none_fields() {
        let station = Station::new("Minimal", "http://min.com/stream");
        let json = serde_json::to_string(&station).unwrap();
        assert!(json.contains("\"name\""));
        assert!(json.contains("\"url\""));
        assert!(!json.contains("logo_url"));
        assert!(!json.contains("homepage"));
        assert!(!json.contains("codec"));
        assert!(!json.contains("bitrate"));
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{"name": "JSON Radio", "url": "http://json.fm/stream"}"#;
        let station: Station = serde_json::from_str(json).unwrap();
        assert_eq!(station.name, "JSON Radio");
        assert_eq!(station.logo_url, None);
        assert_eq!(station.bitrate, None);
    }

    #[test]
    fn test_deserialize_extra_fields_ignored() {
        let json = r#"{
            "name": "Extra Fields Radio",
            "url": "http://extra.fm/stream",
            "clickcount": 9999,
            "uuid": "abc-123"
        }"#;
        let station: Station = serde_json::from_str(json).unwrap();
        assert_eq!(station.name, "Extra Fields Radio");
    }

    #[test]
    fn test_roundtrip_preserves_all_fields() {
        let station = Station::new("Full", "http://full.fm/stream")
            .with_logo("http://full.fm/logo.png")
            .with_homepage("http://full.fm")
            .with_audio_info(Some("AAC".to_string()), Some(256));

        let json = serde_json::to_string(&station).unwrap();
        let back: Station = serde_json::from_str(&json).unwrap();
        assert_eq!(back, station);
    }

    #[test]
    fn test_url_to_id_deterministic() {
        let url = "http://example.com/stream";
        let id1 = url_to_id(url);
        let id2 = url_to_id(url);
        assert_eq!(id1, id2);
        assert_eq!(id1.len(), 16); // 16 hex characters
    }
}
