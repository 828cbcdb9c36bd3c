//! File storage for Filevault.
//!
//! Files live flat inside one directory, each under a random identifier:
//! ```text
//! {base_path}/
//! ├── 3f2a9c4e5b6d4e0fa1b2c3d4e5f60718.pdf
//! ├── 9b1d0c7e2f3a4b5c8d9e0f1a2b3c4d5e.png
//! └── ...
//! ```
//! The directory listing is the only index.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use super::metadata::{StoredFile, StoredFileInfo};
use super::sanitize::sanitize_filename;
use super::validation::{is_plain_identifier, validate_and_normalize};
use super::DEFAULT_MAX_FILE_SIZE;
use crate::{Result, VaultError};

/// Attempts at finding an unused identifier before giving up.
const MAX_NAME_ATTEMPTS: usize = 3;

/// An opened stored file ready to be streamed to a client.
#[derive(Debug)]
pub struct FetchedFile {
    /// Open handle positioned at the start of the file.
    pub file: File,
    /// Size in bytes at the time the file was opened.
    pub size: u64,
    /// Name to suggest for the download (the storage identifier).
    pub download_name: String,
}

/// File storage service backed by a single directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Absolute storage directory.
    base_path: PathBuf,
    /// Largest accepted upload in bytes.
    max_size: u64,
}

impl FileStore {
    /// Create a new FileStore rooted at `base_path`.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        let base_path = fs::canonicalize(&base_path)?;

        Ok(Self {
            base_path,
            max_size: DEFAULT_MAX_FILE_SIZE,
        })
    }

    /// Set the maximum accepted upload size in bytes.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the maximum accepted upload size in bytes.
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Store an in-memory upload.
    ///
    /// Oversized content is rejected before anything touches the disk.
    pub fn store(&self, filename: &str, content: &[u8]) -> Result<StoredFile> {
        validate_and_normalize(filename)?;

        let size = content.len() as u64;
        if size > self.max_size {
            return Err(VaultError::TooLarge {
                size,
                limit: self.max_size,
            });
        }

        self.store_reader(filename, content)
    }

    /// Store an upload read from `reader`.
    ///
    /// The size limit is enforced while copying; when it is exceeded the
    /// partial file is removed and `TooLarge` is returned.
    pub fn store_reader<R: Read>(&self, filename: &str, reader: R) -> Result<StoredFile> {
        let extension = validate_and_normalize(filename)?;
        let display_name = sanitize_filename(filename);

        let (identifier, path, mut file) = self.create_unique(&extension)?;

        let mut limited = reader.take(self.max_size.saturating_add(1));
        let written = match io::copy(&mut limited, &mut file) {
            Ok(n) => n,
            Err(e) => {
                drop(file);
                Self::discard(&path);
                return Err(VaultError::write(&identifier, e));
            }
        };

        if written > self.max_size {
            drop(file);
            Self::discard(&path);
            return Err(VaultError::TooLarge {
                size: written,
                limit: self.max_size,
            });
        }

        let size_bytes = match file.sync_all().and_then(|()| file.metadata()) {
            Ok(meta) => meta.len(),
            Err(e) => {
                drop(file);
                Self::discard(&path);
                return Err(VaultError::write(&identifier, e));
            }
        };

        tracing::info!(
            identifier = %identifier,
            original_name = %display_name,
            size = size_bytes,
            "Stored file"
        );

        Ok(StoredFile {
            identifier,
            display_name: Some(display_name),
            size_bytes,
            extension,
            timestamp: Utc::now(),
        })
    }

    /// List every regular file in storage, most recently modified first.
    pub fn list(&self) -> Result<Vec<StoredFile>> {
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| VaultError::read(self.base_path.display().to_string(), e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| VaultError::read(self.base_path.display().to_string(), e))?;

            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };

            // Follows symlinks, so a link to a regular file is listed.
            let meta = match fs::metadata(entry.path()) {
                Ok(meta) => meta,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(VaultError::read(name, e)),
            };

            if meta.is_file() {
                files.push(StoredFile::from_metadata(name, &meta));
            }
        }

        files.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.identifier.cmp(&b.identifier))
        });

        Ok(files)
    }

    /// Get metadata and the storage path for one file.
    pub fn info(&self, identifier: &str) -> Result<StoredFileInfo> {
        let (path, meta) = self.resolve(identifier)?;

        Ok(StoredFileInfo {
            file: StoredFile::from_metadata(identifier, &meta),
            path,
        })
    }

    /// Open a stored file for download.
    pub fn fetch(&self, identifier: &str) -> Result<FetchedFile> {
        let (path, meta) = self.resolve(identifier)?;

        let file = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => VaultError::NotFound(format!("File: {identifier}")),
            _ => VaultError::read(identifier, e),
        })?;

        Ok(FetchedFile {
            file,
            size: meta.len(),
            download_name: identifier.to_string(),
        })
    }

    /// Delete a stored file.
    ///
    /// Deleting a missing file is `NotFound`, not a silent success.
    pub fn delete(&self, identifier: &str) -> Result<()> {
        let (path, _) = self.resolve(identifier)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(identifier = %identifier, "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(VaultError::NotFound(format!("File: {identifier}")))
            }
            Err(e) => Err(VaultError::remove(identifier, e)),
        }
    }

    /// Generate a new storage identifier: 32 hex characters plus the extension.
    pub fn generate_identifier(extension: &str) -> String {
        format!("{}.{extension}", Uuid::new_v4().simple())
    }

    /// Map an identifier to an existing regular file in storage.
    fn resolve(&self, identifier: &str) -> Result<(PathBuf, fs::Metadata)> {
        let not_found = || VaultError::NotFound(format!("File: {identifier}"));

        if !is_plain_identifier(identifier) {
            return Err(not_found());
        }

        let path = self.base_path.join(identifier);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok((path, meta)),
            Ok(_) => Err(not_found()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(VaultError::read(identifier, e)),
        }
    }

    /// Create a fresh file under a new identifier, never reusing a path.
    fn create_unique(&self, extension: &str) -> Result<(String, PathBuf, File)> {
        let mut last_err = None;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let identifier = Self::generate_identifier(extension);
            let path = self.base_path.join(&identifier);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((identifier, path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::warn!(identifier = %identifier, "Identifier collision, retrying");
                    last_err = Some((identifier, e));
                }
                Err(e) => return Err(VaultError::write(identifier, e)),
            }
        }

        let (identifier, e) = last_err
            .unwrap_or_else(|| (String::new(), io::Error::from(io::ErrorKind::AlreadyExists)));
        Err(VaultError::write(identifier, e))
    }

    /// Best-effort removal of a partially written file.
    fn discard(path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial file");
        }
    }
}
