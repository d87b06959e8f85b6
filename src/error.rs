//! Error types for the board.

use thiserror::Error;

use crate::auth::PasswordError;

/// Common error type for the board.
#[derive(Error, Debug)]
pub enum BbsError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delete password hashing or verification error.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BbsError {
    fn from(e: sqlx::Error) -> Self {
        BbsError::Database(e.to_string())
    }
}

/// Result type alias for board operations.
pub type Result<T> = std::result::Result<T, BbsError>;
