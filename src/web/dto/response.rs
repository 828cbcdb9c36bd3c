//! Response DTOs for the Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::file::{StoredFile, StoredFileInfo};

/// A stored file as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FileResponse {
    /// Storage identifier.
    pub id: String,
    /// Stored filename (same as `id`).
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// Human-readable size, e.g. "1.5MB".
    pub size_formatted: String,
    /// Upload or last-modification time (RFC 3339).
    pub upload_date: String,
    /// Lowercased extension, possibly empty.
    #[serde(rename = "type")]
    pub file_type: String,
}

impl From<&StoredFile> for FileResponse {
    fn from(file: &StoredFile) -> Self {
        Self {
            id: file.identifier.clone(),
            filename: file.identifier.clone(),
            size: file.size_bytes,
            size_formatted: file.size_formatted(),
            upload_date: file.timestamp.to_rfc3339(),
            file_type: file.extension.clone(),
        }
    }
}

/// A freshly uploaded file, including the sanitized original name.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedFileResponse {
    /// Sanitized name submitted by the client.
    pub original_name: String,
    #[serde(flatten)]
    pub file: FileResponse,
}

impl From<&StoredFile> for UploadedFileResponse {
    fn from(file: &StoredFile) -> Self {
        Self {
            original_name: file.display_name.clone().unwrap_or_default(),
            file: FileResponse::from(file),
        }
    }
}

/// A file with its storage path.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileInfoResponse {
    #[serde(flatten)]
    pub file: FileResponse,
    /// Absolute path on the server.
    pub path: String,
}

impl From<&StoredFileInfo> for FileInfoResponse {
    fn from(info: &StoredFileInfo) -> Self {
        Self {
            file: FileResponse::from(&info.file),
            path: info.path.display().to_string(),
        }
    }
}

/// Upload response.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub file: UploadedFileResponse,
}

/// File list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileListResponse {
    /// Files, newest first.
    pub files: Vec<FileResponse>,
}

/// File info response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileInfoEnvelope {
    pub file: FileInfoResponse,
}

/// Plain message response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
