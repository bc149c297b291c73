//! Tracing configuration and log routing.
//!
//! Logs go to stderr using a compact formatter, because stdout carries the MCP stdio channel.
//! They are also appended to a file: `NEWS_AGENT_LOG_FILE` when set, otherwise
//! `logs/news-agent.log`. A non‑blocking writer keeps file I/O off the request path.
use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Environment variable overriding the log file location.
pub const LOG_FILE_ENV: &str = "NEWS_AGENT_LOG_FILE";

const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LOG_FILE: &str = "news-agent.log";

/// Configure tracing subscribers for stderr and the log file.
///
/// - Respects `RUST_LOG` for filtering (defaults to `info`).
/// - Installs a compact stderr layer and, when the file can be opened, a file layer.
/// - Keeps the non‑blocking writer guard alive for the process lifetime.
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing() {
    if LOG_GUARD.get().is_some() {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();
    let file_layer = file_writer(&log_file_path(std::env::var(LOG_FILE_ENV).ok())).map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .compact()
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}

/// Resolve the log file location from an optional override.
fn log_file_path(override_path: Option<String>) -> PathBuf {
    override_path
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(DEFAULT_LOG_DIR).join(DEFAULT_LOG_FILE))
}

/// Open `path` for appending and wrap it in a non‑blocking writer.
///
/// Returns `None` when the parent directory cannot be created or the file cannot be opened;
/// stderr logging still works in that case.
fn file_writer(path: &Path) -> Option<NonBlocking> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            eprintln!("Failed to create log directory {}: {err}", parent.display());
            return None;
        }
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(non_blocking)
        }
        Err(err) => {
            eprintln!("Failed to open log file {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_logs_directory() {
        assert_eq!(log_file_path(None), PathBuf::from("logs/news-agent.log"));
        assert_eq!(
            log_file_path(Some("  ".into())),
            PathBuf::from("logs/news-agent.log")
        );
    }

    #[test]
    fn honors_override() {
        assert_eq!(
            log_file_path(Some("/tmp/agent.log".into())),
            PathBuf::from("/tmp/agent.log")
        );
    }
}
