//! Base error types for git-hooks
//!
//! This module provides the error type shared by the engine and the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No git repository above the starting directory
    #[error("git-hooks must be run inside a git repository: {}", path.display())]
    NotARepository { path: PathBuf },

    /// A `hooks.old` backup already exists
    #[error("git-hooks already installed in {}", git_dir.display())]
    AlreadyInstalled { git_dir: PathBuf },

    /// Nothing to restore on uninstall
    #[error("git-hooks is not installed in {}", git_dir.display())]
    NotInstalled { git_dir: PathBuf },

    /// Hook file name is not one of the known Git hooks
    #[error("Unknown hook type: {0}")]
    UnknownHookType(String),

    /// Path is not absolute
    #[error("Path must be absolute: {}", path.display())]
    PathNotAbsolute { path: PathBuf },

    /// A hook process could not be started
    #[error("Failed to spawn hook {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No usable shebang line to run a script through
    #[error("Cannot determine interpreter for {}: {reason}", path.display())]
    NoInterpreter { path: PathBuf, reason: String },

    /// The ignore-rule evaluator failed
    #[error("Ignore check failed: {0}")]
    IgnoreCheck(String),

    /// Git library error
    #[error("Git error: {0}")]
    Git(String),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
