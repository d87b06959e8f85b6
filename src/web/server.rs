//! Web server for the board.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::file::ImageStorage;
use crate::{BbsError, Database, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// HTTP server hosting the board.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// Fails when the listen address does not parse or the upload
    /// directory cannot be created.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| BbsError::Config(format!("invalid listen address: {}", e)))?;

        let storage = ImageStorage::new(&config.upload.directory)?;
        tracing::info!("Image storage initialized at: {}", config.upload.directory);

        let app_state = AppState::from_config(config, Arc::new(db), storage);

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the application state.
    pub fn state(&self) -> Arc<AppState> {
        self.app_state.clone()
    }

    fn build_router(app_state: Arc<AppState>) -> Router {
        create_router(app_state)
            .merge(create_health_router())
            .layer(CompressionLayer::new())
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = Self::build_router(self.app_state);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = Self::build_router(self.app_state);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn create_test_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config.upload.directory = dir.path().join("image").to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let dir = TempDir::new().unwrap();
        let config = create_test_config(&dir);
        let db = Database::open_in_memory().await.unwrap();

        let server = WebServer::new(&config, db).unwrap();
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
        assert!(dir.path().join("image").is_dir());
        assert_eq!(server.state().page_size, 10);
    }

    #[tokio::test]
    async fn test_web_server_invalid_host() {
        let dir = TempDir::new().unwrap();
        let mut config = create_test_config(&dir);
        config.server.host = "not an address".to_string();
        let db = Database::open_in_memory().await.unwrap();

        let result = WebServer::new(&config, db);
        assert!(matches!(result, Err(BbsError::Config(_))));
    }

    #[tokio::test]
    async fn test_web_server_run() {
        let dir = TempDir::new().unwrap();
        let config = create_test_config(&dir);
        let db = Database::open_in_memory().await.unwrap();

        let server = WebServer::new(&config, db).unwrap();
        let addr = server.run_with_addr().await.unwrap();

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with("OK"));
    }
}
