//! Web API module for Filevault.
//!
//! A thin axum layer over [`crate::file::FileStore`]: each handler extracts
//! request parameters, calls one store operation and serializes the result.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
