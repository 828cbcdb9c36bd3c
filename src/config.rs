//! Configuration module for Filevault.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, VaultError};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// File storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Path to the file storage directory.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_path() -> String {
    "uploads".to_string()
}

fn default_max_upload_size() -> u64 {
    100
}

impl FilesConfig {
    /// Maximum upload size in bytes, saturating at `u64::MAX`.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/filevault.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Web layer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether to serve the static web UI.
    #[serde(default)]
    pub serve_static: bool,
    /// Path to static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_static_path() -> String {
    "static".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec![],
            serve_static: false,
            static_path: default_static_path(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// File storage configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web layer configuration.
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(VaultError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| VaultError::Config(format!("parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FILEVAULT_STORAGE_PATH`: Override the storage directory
    /// - `FILEVAULT_PORT`: Override the listen port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("FILEVAULT_STORAGE_PATH") {
            if !path.is_empty() {
                self.files.storage_path = path;
            }
        }

        if let Ok(port) = std::env::var("FILEVAULT_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => eprintln!("Ignoring invalid FILEVAULT_PORT: {port}"),
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.files.storage_path.trim().is_empty() {
            return Err(VaultError::Config(
                "files.storage_path must not be empty".to_string(),
            ));
        }
        if self.files.max_upload_size_mb == 0 {
            return Err(VaultError::Config(
                "files.max_upload_size_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);

        assert_eq!(config.files.storage_path, "uploads");
        assert_eq!(config.files.max_upload_size_mb, 100);
        assert_eq!(config.files.max_upload_bytes(), 100 * 1024 * 1024);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/filevault.log");

        assert!(config.web.cors_origins.is_empty());
        assert!(!config.web.serve_static);
        assert_eq!(config.web.static_path, "static");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[files]
storage_path = "custom/files"
max_upload_size_mb = 20

[logging]
level = "debug"
file = "custom/logs/app.log"

[web]
cors_origins = ["http://localhost:3000"]
serve_static = true
static_path = "public"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.files.storage_path, "custom/files");
        assert_eq!(config.files.max_upload_size_mb, 20);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
        assert_eq!(config.web.cors_origins, vec!["http://localhost:3000"]);
        assert!(config.web.serve_static);
        assert_eq!(config.web.static_path, "public");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[files]
storage_path = "data"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.files.storage_path, "data");
        assert_eq!(config.files.max_upload_size_mb, 100);
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not [valid toml");
        assert!(matches!(result, Err(VaultError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("definitely/not/here.toml");
        assert!(matches!(result, Err(VaultError::Io(_))));
    }

    #[test]
    fn test_max_upload_bytes_saturates() {
        let files = FilesConfig {
            max_upload_size_mb: u64::MAX / 1024,
            ..FilesConfig::default()
        };
        assert_eq!(files.max_upload_bytes(), u64::MAX);

        let files = FilesConfig {
            max_upload_size_mb: 3,
            ..FilesConfig::default()
        };
        assert_eq!(files.max_upload_bytes(), 3 * 1024 * 1024);
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.files.storage_path = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.files.max_upload_size_mb = 0;
        assert!(config.validate().is_err());
    }
}
