//! Common helpers for board integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use anchorbbs::web::handlers::AppState;
use anchorbbs::web::router::{create_health_router, create_router};
use anchorbbs::{Database, ImageStorage, Post, PostRepository};
use axum_test::TestServer;
use tempfile::TempDir;

/// A running board backed by an in-memory database and a temp image dir.
pub struct TestBoard {
    pub server: TestServer,
    pub db: Arc<Database>,
    pub storage: ImageStorage,
    _dir: TempDir,
}

impl TestBoard {
    /// Board with default settings.
    pub async fn new() -> Self {
        Self::with_state(|state| state).await
    }

    /// Board whose state is adjusted before the router is built.
    pub async fn with_state(adjust: impl FnOnce(AppState) -> AppState) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage =
            ImageStorage::new(dir.path().join("image")).expect("Failed to create image storage");
        let db = Arc::new(
            Database::open_in_memory()
                .await
                .expect("Failed to create test database"),
        );

        let state = adjust(AppState::new(db.clone(), storage.clone()).with_timezone("UTC"));
        let router = create_router(Arc::new(state)).merge(create_health_router());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            db,
            storage,
            _dir: dir,
        }
    }

    /// Number of stored posts.
    pub async fn post_count(&self) -> i64 {
        PostRepository::new(self.db.pool()).count().await.unwrap()
    }

    /// Fetch a post directly from the database.
    pub async fn post(&self, id: i64) -> Option<Post> {
        PostRepository::new(self.db.pool())
            .get_by_id(id)
            .await
            .unwrap()
    }

    /// Submit a text-only post through the urlencoded form.
    pub async fn submit_text(&self, body: &str, password: &str) {
        let response = self
            .server
            .post("/")
            .form(&[("body", body), ("delete_password", password)])
            .await;
        response.assert_status(axum::http::StatusCode::FOUND);
    }
}

/// A minimal valid PNG (1x1, transparent).
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

/// Count rendered posts in a board page.
pub fn entry_count(html: &str) -> usize {
    html.matches("<dl class=\"entry\"").count()
}
