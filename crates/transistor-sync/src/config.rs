//! Configuration constants for Transistor Sync

/// Application metadata
pub mod app {
    /// Application name (used for config directory, etc.)
    pub const NAME: &str = "transistor-sync";

    /// Local station collection file name
    pub const STATIONS_FILE: &str = "stations.json";
}

/// Backup naming — fixed, not configurable
pub mod sync {
    /// Folder in the remote drive holding the backup
    pub const BACKUP_FOLDER: &str = "Transistor_Backup";

    /// The single backup file inside the folder
    pub const BACKUP_FILE: &str = "stations.json";
}

/// Google Drive API endpoints and markers
pub mod drive {
    /// Metadata and query endpoint (files.list, files.create, files.get)
    pub const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

    /// Content upload endpoint (create with payload, update content)
    pub const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";

    /// Mime type marking a Drive entry as a folder
    pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

    /// Mime type of the backup payload
    pub const BACKUP_MIME_TYPE: &str = "application/json";

    /// Fields requested from list calls
    pub const LIST_FIELDS: &str = "files(id,name,mimeType)";
}

/// Sign-in configuration
pub mod auth {
    /// OAuth consent endpoint
    pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

    /// Per-app drive file access (only files this app created)
    pub const SCOPE_DRIVE_FILE: &str = "https://www.googleapis.com/auth/drive.file";

    /// Account email, for display only
    pub const SCOPE_EMAIL: &str = "email";

    /// Cached session file name
    pub const SESSION_FILE: &str = "session.json";
}

/// Network-related configuration
pub mod network {
    /// User agent for HTTP requests
    pub const USER_AGENT: &str = concat!("TransistorSync/", env!("CARGO_PKG_VERSION"));

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Read timeout in seconds
    pub const READ_TIMEOUT_SECS: u64 = 30;
}
