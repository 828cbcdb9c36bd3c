//! File handlers for the Web API.

use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::file::validate_and_normalize;
use crate::web::dto::{
    FileInfoEnvelope, FileListResponse, FileResponse, MessageResponse, UploadResponse,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::VaultError;

/// Name of the multipart field carrying the upload.
const FILE_FIELD: &str = "file";

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Control characters are removed, quotes and backslashes replaced, and
/// non-ASCII names get an RFC 5987 `filename*` parameter.
fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let encoded = urlencoding::encode(filename);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("File too large")
    } else {
        tracing::warn!("Failed to read multipart data: {}", e);
        ApiError::bad_request("Invalid multipart data")
    }
}

/// POST /api/upload - Upload a file.
///
/// Request body: multipart/form-data with a "file" field.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "files",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File uploaded", body = UploadResponse),
        (status = 400, description = "No file, empty filename or file type not allowed"),
        (status = 413, description = "File too large"),
        (status = 500, description = "Failed to save file")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let max_size = state.store.max_size();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();

        // Reject bad names before reading the body.
        validate_and_normalize(&filename)?;

        let mut content = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            let size = (content.len() + chunk.len()) as u64;
            if size > max_size {
                return Err(VaultError::TooLarge {
                    size,
                    limit: max_size,
                }
                .into());
            }
            content.extend_from_slice(&chunk);
        }

        upload = Some((filename, content));
        break;
    }

    let (filename, content) = upload.ok_or_else(|| ApiError::bad_request("No file selected"))?;

    let stored = state.store.store(&filename, &content)?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            file: (&stored).into(),
        }),
    ))
}

/// GET /api/files - List stored files, newest first.
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    responses(
        (status = 200, description = "Stored files, newest first", body = FileListResponse),
        (status = 500, description = "Failed to list files")
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FileListResponse>, ApiError> {
    let files = state.store.list()?;

    Ok(Json(FileListResponse {
        files: files.iter().map(FileResponse::from).collect(),
    }))
}

/// GET /api/download/:id - Download a file.
#[utoipa::path(
    get,
    path = "/api/download/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "Storage identifier")
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 404, description = "File not found"),
        (status = 500, description = "Failed to read file")
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Response<Body>, ApiError> {
    let fetched = state.store.fetch(&identifier)?;

    let content_type = mime_guess::from_path(&fetched.download_name)
        .first_or_octet_stream()
        .to_string();

    let stream = ReaderStream::new(tokio::fs::File::from_std(fetched.file));

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&fetched.download_name),
        )
        .header(header::CONTENT_LENGTH, fetched.size)
        .body(Body::from_stream(stream))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })
}

/// DELETE /api/delete/:id - Delete a file.
#[utoipa::path(
    delete,
    path = "/api/delete/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "Storage identifier")
    ),
    responses(
        (status = 200, description = "File deleted", body = MessageResponse),
        (status = 404, description = "File not found"),
        (status = 500, description = "Failed to delete file")
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete(&identifier)?;

    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// GET /api/info/:id - Get file metadata including its storage path.
#[utoipa::path(
    get,
    path = "/api/info/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "Storage identifier")
    ),
    responses(
        (status = 200, description = "File metadata", body = FileInfoEnvelope),
        (status = 404, description = "File not found"),
        (status = 500, description = "Failed to read file metadata")
    )
)]
pub async fn get_file_info(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<FileInfoEnvelope>, ApiError> {
    let info = state.store.info(&identifier)?;

    Ok(Json(FileInfoEnvelope {
        file: (&info).into(),
    }))
}
