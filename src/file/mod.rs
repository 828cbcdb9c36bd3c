//! File storage module for Filevault.
//!
//! This module provides the storage core of the service:
//! - Extension allow-list validation
//! - Display-name sanitization
//! - Random, extension-preserving storage identifiers
//! - Metadata derived from the storage directory on every query

mod metadata;
mod sanitize;
mod storage;
mod validation;

pub use metadata::{format_file_size, StoredFile, StoredFileInfo};
pub use sanitize::sanitize_filename;
pub use storage::{FetchedFile, FileStore};
pub use validation::{extension_of, is_plain_identifier, validate_and_normalize};

/// Extensions accepted for upload (compared lowercased).
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "zip", "rar", "mp3", "mp4", "avi",
];

/// Default maximum upload size (100MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
