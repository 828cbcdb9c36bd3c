//! Tracing setup for Filevault.
//!
//! Upload and delete events are the only record of what happened to the
//! storage directory, so the log file is appended to across restarts.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Map a configured level name to a tracing level, defaulting to `INFO`.
fn level_from_name(name: &str) -> Level {
    name.trim().parse::<Level>().unwrap_or(Level::INFO)
}

/// `RUST_LOG` directives plus the configured level as the floor.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(level_from_name(level).into())
}

/// Open `path` for appending, creating it and its parent directory if needed.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install a subscriber that writes to stdout and to `config.file`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let log_file = Arc::new(open_log_file(Path::new(&config.file))?);

    let output = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout.and(log_file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter(&config.level))
        .with(output)
        .init();

    Ok(())
}

/// Install a stdout-only subscriber. Used when the log file can't be opened.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
