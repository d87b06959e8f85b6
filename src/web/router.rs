//! Router configuration for the board.

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::{handle_post, health_check, show_board, AppState};
use super::middleware::security_headers;

/// URL prefix under which stored images are served.
pub const IMAGE_ROUTE: &str = "/image";

/// Create the main board router.
///
/// `GET /` renders the board, `POST /` creates or deletes a post, and
/// stored images are served from [`IMAGE_ROUTE`].
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let images = ServeDir::new(app_state.storage.base_path());
    let body_limit = app_state.max_upload_bytes;

    Router::new()
        .route("/", get(show_board).post(handle_post))
        .nest_service(IMAGE_ROUTE, images)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}
