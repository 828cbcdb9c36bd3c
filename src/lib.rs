//! Filevault - a small HTTP file-storage service.
//!
//! Uploaded files are kept in a single directory under random identifiers;
//! the directory itself is the only index.

pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{Result, VaultError};
pub use file::{FetchedFile, FileStore, StoredFile, StoredFileInfo};
