//! Configuration module for the board.

use serde::Deserialize;
use std::path::Path;

use crate::{BbsError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timezone for displaying post dates (e.g., "Asia/Tokyo", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timezone: default_timezone(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/bbs.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Image upload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Directory uploaded images are written to and served from.
    #[serde(default = "default_upload_dir")]
    pub directory: String,
    /// Maximum request body size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_upload_dir() -> String {
    "data/image".to_string()
}

fn default_max_upload_size() -> u64 {
    10
}

impl UploadConfig {
    /// Maximum request body size in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        (self.max_upload_size_mb * 1024 * 1024) as usize
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: default_upload_dir(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

/// Board presentation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Page title.
    #[serde(default = "default_board_title")]
    pub title: String,
    /// Number of posts per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_board_title() -> String {
    "掲示板".to_string()
}

fn default_page_size() -> u32 {
    10
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: default_board_title(),
            page_size: default_page_size(),
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
    "logs/bbs.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Upload configuration.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Board configuration.
    #[serde(default)]
    pub board: BoardConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BbsError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BbsError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `BBS_DATABASE_PATH`: Override the database file path
    /// - `BBS_UPLOAD_DIR`: Override the image upload directory
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("BBS_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
        if let Ok(dir) = std::env::var("BBS_UPLOAD_DIR") {
            if !dir.is_empty() {
                self.upload.directory = dir;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.board.page_size == 0 {
            return Err(BbsError::Config(
                "board.page_size must be at least 1".to_string(),
            ));
        }
        if self.upload.max_upload_size_mb == 0 {
            return Err(BbsError::Config(
                "upload.max_upload_size_mb must be at least 1".to_string(),
            ));
        }
        if self.server.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(BbsError::Config(format!(
                "unknown timezone: {}",
                self.server.timezone
            )));
        }
        Ok(())
    }
}
