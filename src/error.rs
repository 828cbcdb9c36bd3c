//! Error types for Filevault.

use thiserror::Error;

/// Common error type for Filevault.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Missing or unusable input (no file, empty filename, unsafe identifier).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The submitted filename has no extension or one outside the allow-list.
    #[error("file type not allowed: {0}")]
    InvalidFileType(String),

    /// The upload exceeds the configured maximum size.
    #[error("file too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge {
        /// Number of bytes seen before the upload was rejected.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// No regular file with the given identifier exists.
    #[error("{0} not found")]
    NotFound(String),

    /// Writing a new file to the storage directory failed.
    #[error("failed to write {name}: {source}")]
    WriteFailure {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading or stat-ing a stored file (or the directory) failed.
    #[error("failed to read {name}: {source}")]
    ReadFailure {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Removing a stored file failed.
    #[error("failed to remove {name}: {source}")]
    RemoveFailure {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error outside of a storage operation (startup, logging).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VaultError {
    pub(crate) fn write(name: impl Into<String>, source: std::io::Error) -> Self {
        VaultError::WriteFailure {
            name: name.into(),
            source,
        }
    }

    pub(crate) fn read(name: impl Into<String>, source: std::io::Error) -> Self {
        VaultError::ReadFailure {
            name: name.into(),
            source,
        }
    }

    pub(crate) fn remove(name: impl Into<String>, source: std::io::Error) -> Self {
        VaultError::RemoveFailure {
            name: name.into(),
            source,
        }
    }
}

/// Result type alias for Filevault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
