//! git-hooks CLI library
//!
//! This library contains all the CLI logic for git-hooks, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;
pub mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;

/// git-hooks - Run hooks committed with your repository
#[derive(Parser)]
#[command(name = "git-hooks")]
#[command(about = "Run Git hooks stored in the repository's .githooks directory")]
#[command(version)]
#[command(
    long_about = "Run Git hooks stored in the repository's .githooks directory

Hooks live in .githooks/<hook-name>/ next to your code, so they can be
committed and shared. `git-hooks install` replaces .git/hooks with small
shims that forward every Git event to `git-hooks run`, which executes the
matching hooks in lexicographic order and stops at the first failure.

Layout:
  .githooks/pre-commit/01-format
  .githooks/pre-commit/02-lint
  .githooks/commit-msg/check-ticket"
)]
pub struct Cli {
    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "GIT_HOOKS_LOG_FILE", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for git-hooks CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Install hook shims into the current repository
    Install(cmd::install::InstallCommand),

    /// Remove hook shims and restore the original hooks
    Uninstall(cmd::install::UninstallCommand),

    /// Run the hooks for a Git event (called by the installed shims)
    #[command(long_about = "Run the hooks for a Git event

This is what the shims in .git/hooks call. HOOK_FILE is the path Git
invoked; the event name and project root are derived from it. Remaining
arguments and stdin are handed to every hook unchanged.

The exit code is 0 when every hook succeeded (or none exist), otherwise the
exit code of the first failing hook.")]
    Run(cmd::run::RunCommand),

    /// List hooks found in .githooks and whether they would run
    List(cmd::list::ListCommand),
}

/// Main entry point for the CLI logic
///
/// Returns the process exit code on success.
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - The current directory cannot be determined
/// - Command execution fails
pub fn run(cli: Cli) -> Result<i32> {
    crate::logging::init(cli.verbose, cli.log_file.as_deref())?;

    let context = RuntimeContext::new()?;

    let code = match cli.command {
        Commands::Install(install_cmd) => {
            install_cmd.execute(&context)?;
            0
        }
        Commands::Uninstall(uninstall_cmd) => {
            uninstall_cmd.execute(&context)?;
            0
        }
        Commands::Run(run_cmd) => run_cmd.execute(&context)?,
        Commands::List(list_cmd) => {
            list_cmd.execute(&context)?;
            0
        }
    };

    Ok(code)
}
