//! File-based tracing setup.
//!
//! The TUI owns the terminal, so log output goes to
//! `${CLOTHE_HOME}/logs/clothe.log` through a non-blocking writer.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::paths;

/// Environment variable holding an `EnvFilter` directive (e.g. `clothe_core=debug`).
pub const LOG_ENV: &str = "CLOTHE_LOG";

const LOG_FILE_NAME: &str = "clothe.log";

/// Keeps the background log writer alive; flushes on drop.
#[must_use = "dropping the guard stops log output"]
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Installs the global subscriber.
///
/// `default_level` is used when `CLOTHE_LOG` is unset or empty.
///
/// # Errors
/// Returns an error if the log directory cannot be created, the filter is
/// invalid, or a global subscriber is already installed.
pub fn init(default_level: &str) -> Result<LogGuard> {
    let dir = paths::logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref(), default_level)?;
    let format_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(format_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard { _worker: worker })
}

fn build_filter(env_directive: Option<&str>, default_level: &str) -> Result<EnvFilter> {
    let directive = env_directive
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(default_level);
    EnvFilter::try_new(directive).with_context(|| format!("Invalid log filter: {directive}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_directive_wins_over_default() {
        let filter = build_filter(Some("clothe_core=debug"), "info").unwrap();
        assert!(filter.to_string().contains("clothe_core=debug"));
    }

    #[test]
    fn test_blank_env_directive_falls_back() {
        let filter = build_filter(Some("   "), "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");
    }
}
