//! Request DTOs for the Web API.

use utoipa::ToSchema;

/// Multipart upload form (documentation only; the handler reads the
/// multipart stream directly).
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// File content. The part's filename decides the stored extension.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
