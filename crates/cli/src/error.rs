//! Error types for CLI commands
//!
//! Commands return [`CommandError`]; `run` turns it into an `anyhow::Error`
//! for the final report.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Error reported by the engine
    #[error(transparent)]
    Engine(#[from] githooks_core::Error),

    /// No repository contains the given directory
    #[error("git-hooks must be run inside a git repository: {}", .0.display())]
    NotInWorkTree(PathBuf),

    /// Failed to locate the running executable
    #[error("Cannot determine the git-hooks executable path: {0}")]
    RunnerPath(#[source] std::io::Error),

    /// JSON output failed
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;
