//! anchorbbs - an anonymous single-page bulletin board.
//!
//! Posts carry a text body, an optional image and an optional delete
//! password. `>>N` in a body links to post `N` on whichever page it lives.

pub mod auth;
pub mod board;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{hash_password, validate_password, verify_password, PasswordError};
pub use board::{
    BoardPage, BoardService, DeleteOutcome, ImageUpload, NewPost, Post, PostRepository, Rejection,
    Submission, SubmitOutcome,
};
pub use config::Config;
pub use db::Database;
pub use error::{BbsError, Result};
pub use file::ImageStorage;
pub use web::WebServer;
