//! Metadata derived from files in the storage directory.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::validation::extension_of;

/// A stored file as seen from the storage directory.
///
/// Nothing here is persisted separately; every field is rebuilt from the
/// filesystem on each query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Storage identifier (the filename on disk).
    pub identifier: String,
    /// Sanitized name submitted by the client. Only known right after upload.
    pub display_name: Option<String>,
    /// Size on disk in bytes.
    pub size_bytes: u64,
    /// Lowercased extension, empty if none.
    pub extension: String,
    /// Upload time for fresh uploads, last-modification time otherwise.
    pub timestamp: DateTime<Utc>,
}

impl StoredFile {
    /// Build a record for `identifier` from its filesystem metadata.
    pub(crate) fn from_metadata(identifier: impl Into<String>, meta: &fs::Metadata) -> Self {
        let identifier = identifier.into();
        let timestamp = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Self {
            extension: extension_of(&identifier),
            identifier,
            display_name: None,
            size_bytes: meta.len(),
            timestamp,
        }
    }

    /// Human-readable size, e.g. `"1.5MB"`.
    pub fn size_formatted(&self) -> String {
        format_file_size(self.size_bytes)
    }
}

/// A stored file together with its resolved storage path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFileInfo {
    pub file: StoredFile,
    /// Absolute path of the file on disk.
    pub path: PathBuf,
}

/// Format a byte count for display.
///
/// Divides by 1024 while the value is at least 1024, at most three times,
/// and prints one decimal place with a `B`/`KB`/`MB`/`GB` suffix.
pub fn format_file_size(size_bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if size_bytes == 0 {
        return "0B".to_string();
    }

    let mut size = size_bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1}{}", size, UNITS[unit])
}
