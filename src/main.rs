use std::process::ExitCode;

use tracing::{error, info};

use filevault::web::WebServer;
use filevault::{Config, FileStore};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.apply_env_overrides();

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    // Initialize logging
    if let Err(e) = filevault::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        filevault::logging::init_console_only(&config.logging.level);
    }

    info!("Filevault - file storage service");

    let store = match FileStore::new(&config.files.storage_path) {
        Ok(store) => store.with_max_size(config.files.max_upload_bytes()),
        Err(e) => {
            error!("Failed to open storage at {}: {}", config.files.storage_path, e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Storage directory: {} (max upload {}MB)",
        store.base_path().display(),
        config.files.max_upload_size_mb
    );

    let server = match WebServer::new(&config.server, &config.web, store) {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
