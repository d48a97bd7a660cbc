//! Observability utilities.

use std::fs::{File, OpenOptions};
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::types::ObservabilityConfig;

/// Fixed target every tool log record is emitted under.
pub const LOG_TARGET: &str = "mealie_mcp";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Initialize tracing subscriber once for the process.
///
/// Records go to stderr (stdout carries the MCP protocol) and, when
/// configured, are appended to a log file. Format defaults to plain text and
/// can be switched to JSON via `MEALIE_MCP_LOG_FORMAT=json`. Filter defaults to
/// the configured level if `RUST_LOG` is unset.
pub fn init_tracing(config: &ObservabilityConfig) {
    TRACING_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        let file = config.log_file.as_ref().and_then(|path| {
            open_log_file(path)
                .map_err(|err| eprintln!("log file {} unavailable: {err}", path.display()))
                .ok()
        });

        let result = if config.json_logs {
            let file_layer =
                file.map(|f| fmt::layer().json().with_ansi(false).with_writer(Mutex::new(f)));
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(file_layer)
                .try_init()
        } else {
            let file_layer =
                file.map(|f| fmt::layer().compact().with_ansi(false).with_writer(Mutex::new(f)));
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .with(file_layer)
                .try_init()
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}

fn open_log_file(path: &std::path::Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
