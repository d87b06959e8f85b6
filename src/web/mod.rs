//! Web interface for the board.
//!
//! A single page lists posts newest-first and hosts the compose and delete
//! forms; both forms post back to `/` and are answered with a redirect.

pub mod error;
pub mod form;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod view;

pub use error::{ErrorCode, PageError};
pub use handlers::{AppState, SharedDatabase};
pub use router::{create_health_router, create_router};
pub use server::WebServer;
