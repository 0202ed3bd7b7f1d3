//! Logging configuration for git-hooks CLI
//!
//! Terminal output always goes to stderr: stdout belongs to the hooks, and
//! Git shows both to the user.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable debug level logging
/// * `log_file` - Optional path to write logs to a file
///
/// # Examples
/// ```ignore
/// // Warnings only
/// init(false, None)?;
///
/// // Verbose mode with debug level
/// init(true, None)?;
///
/// // Write logs to file
/// init(false, Some(Path::new("git-hooks.log")))?;
/// ```
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    // Allows overriding with RUST_LOG env var
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!(
            "githooks={level},githooks_engine={level},githooks_core={level}"
        ))
        .context("Failed to create log filter")?,
    };

    let terminal_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false);

    // No timestamps in normal mode
    let terminal_layer = if verbose {
        terminal_layer.compact().boxed()
    } else {
        terminal_layer.without_time().compact().boxed()
    };

    let file_layer = match log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(terminal_layer.with_filter(env_filter))
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
