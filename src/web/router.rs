//! Router configuration for the Web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{
    FileInfoEnvelope, FileInfoResponse, FileListResponse, FileResponse, MessageResponse,
    UploadForm, UploadResponse, UploadedFileResponse,
};
use super::handlers::{
    delete_file, download_file, get_file_info, list_files, upload_file, AppState,
};
use super::middleware::create_cors_layer;

/// Room for multipart boundaries and part headers on top of the file limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// OpenAPI document for the file API.
#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::file::upload_file,
        super::handlers::file::list_files,
        super::handlers::file::download_file,
        super::handlers::file::delete_file,
        super::handlers::file::get_file_info,
    ),
    components(schemas(
        FileResponse,
        UploadedFileResponse,
        FileInfoResponse,
        UploadResponse,
        FileListResponse,
        FileInfoEnvelope,
        MessageResponse,
        UploadForm,
    )),
    tags((name = "files", description = "Upload, list, download and delete stored files"))
)]
pub struct ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let body_limit = usize::try_from(app_state.store.max_size())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    let api_routes = Router::new()
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/files", get(list_files))
        .route("/download/:id", get(download_file))
        .route("/delete/:id", delete(delete_file))
        .route("/info/:id", get(get_file_info));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Create a router serving the static web UI, if the directory exists.
///
/// Unknown paths fall back to `index.html`.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let dir = Path::new(static_path);
    if !dir.is_dir() {
        tracing::warn!("Static directory not found: {}", static_path);
        return None;
    }

    let index = dir.join("index.html");
    Some(Router::new().fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index))))
}
