//! API error handling for the Filevault web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::VaultError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Payload too large (413).
    PayloadTooLarge,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
///
/// `error` carries the human-readable message, `code` the machine-readable kind.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Error code.
    pub code: ErrorCode,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a payload too large error.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PayloadTooLarge, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<VaultError> for ApiError {
    fn from(err: VaultError) -> Self {
        match &err {
            VaultError::InvalidInput(msg) => ApiError::bad_request(capitalize(msg)),
            VaultError::InvalidFileType(_) => ApiError::bad_request("File type not allowed"),
            VaultError::TooLarge { limit, .. } => ApiError::payload_too_large(format!(
                "File too large (max {}MB)",
                limit / 1024 / 1024
            )),
            VaultError::NotFound(_) => ApiError::not_found("File not found"),
            VaultError::WriteFailure { .. } => {
                tracing::error!("Failed to save file: {}", err);
                ApiError::internal("Failed to save file")
            }
            VaultError::ReadFailure { .. } => {
                tracing::error!("Failed to read file: {}", err);
                ApiError::internal("Failed to read file")
            }
            VaultError::RemoveFailure { .. } => {
                tracing::error!("Failed to delete file: {}", err);
                ApiError::internal("Failed to delete file")
            }
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

fn capitalize(msg: &str) -> String {
    let mut chars = msg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_vault_error() {
        let err: ApiError = VaultError::InvalidInput("no file selected".to_string()).into();
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "No file selected");

        let err: ApiError = VaultError::InvalidFileType("noext".to_string()).into();
        assert_eq!(err.code(), ErrorCode::BadRequest);

        let err: ApiError = VaultError::TooLarge {
            size: 200 * 1024 * 1024,
            limit: 100 * 1024 * 1024,
        }
        .into();
        assert_eq!(err.code(), ErrorCode::PayloadTooLarge);
        assert_eq!(err.message(), "File too large (max 100MB)");

        let err: ApiError = VaultError::NotFound("File: x.pdf".to_string()).into();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_io_failures_hide_details() {
        let err: ApiError = VaultError::ReadFailure {
            name: "/srv/uploads/secret.txt".to_string(),
            source: io::Error::new(io::ErrorKind::Other, "device error"),
        }
        .into();

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(!err.message().contains("/srv/uploads"));
        assert!(!err.message().contains("device error"));
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            error: "File not found".to_string(),
            code: ErrorCode::NotFound,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "File not found");
        assert_eq!(json["code"], "NOT_FOUND");
    }
}
