use tracing::{error, info};

use anchorbbs::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = anchorbbs::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        anchorbbs::logging::init_console_only(&config.logging.level);
    }

    info!("anchorbbs starting");
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database {}: {}", config.database.path, e);
            std::process::exit(1);
        }
    };
    info!("Database opened at {}", config.database.path);

    let server = match WebServer::new(&config, db) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create web server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
