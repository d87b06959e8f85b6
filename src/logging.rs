//! Logging for the board server.
//!
//! Post creation, deletion and rejected uploads are logged through
//! `tracing`; the `[logging]` section picks the level and the file that
//! mirrors the console output.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Level named in `[logging] level`; unknown names mean INFO.
fn parse_level(level: &str) -> Level {
    match level.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Open the board log for appending, creating its directory if needed.
///
/// Earlier runs are kept so a deletion can still be traced after a restart.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Log to stdout and to `[logging] file`.
///
/// `RUST_LOG` directives are added on top of the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(parse_level(&config.level).into());
    let log_file = Arc::new(open_log_file(Path::new(&config.file))?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout.and(log_file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .init();

    Ok(())
}

/// Log to stdout only; used when the log file can't be opened.
pub fn init_console_only(level: &str) {
    let filter = EnvFilter::from_default_env().add_directive(parse_level(level).into());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_target(true),
        )
        .with(filter)
        .init();
}
