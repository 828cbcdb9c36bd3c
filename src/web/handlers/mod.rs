//! API handlers for the Web API.

pub mod file;

pub use file::*;

use crate::file::FileStore;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// File storage every handler operates on.
    pub store: FileStore,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }
}
