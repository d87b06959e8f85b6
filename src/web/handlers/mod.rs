//! Page handlers and shared state.

pub mod board;

pub use board::*;

use std::sync::Arc;

use crate::config::{BoardConfig, Config, UploadConfig};
use crate::file::ImageStorage;
use crate::Database;

/// Database handle shared across handlers.
pub type SharedDatabase = Arc<Database>;

/// Application state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database.
    pub db: SharedDatabase,
    /// Uploaded image storage.
    pub storage: ImageStorage,
    /// Page title.
    pub title: String,
    /// Posts per page.
    pub page_size: u32,
    /// Timezone for post timestamps.
    pub timezone: String,
    /// Request body limit in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create state with default board settings.
    pub fn new(db: SharedDatabase, storage: ImageStorage) -> Self {
        let board = BoardConfig::default();
        Self {
            db,
            storage,
            title: board.title,
            page_size: board.page_size,
            timezone: "UTC".to_string(),
            max_upload_bytes: UploadConfig::default().max_upload_bytes(),
        }
    }

    /// Create state from the full configuration.
    pub fn from_config(config: &Config, db: SharedDatabase, storage: ImageStorage) -> Self {
        Self::new(db, storage)
            .with_board_config(&config.board)
            .with_timezone(&config.server.timezone)
            .with_max_upload_bytes(config.upload.max_upload_bytes())
    }

    /// Apply board settings.
    pub fn with_board_config(mut self, board: &BoardConfig) -> Self {
        self.title = board.title.clone();
        self.page_size = board.page_size.max(1);
        self
    }

    /// Set the display timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Set the request body limit.
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}
