//! Install and uninstall commands
//!
//! Swap `.git/hooks` for the shim directory and back.

use clap::Args;
use githooks_engine::Installer;
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};

/// Install command
#[derive(Debug, Args)]
pub struct InstallCommand {
    /// Repository to install into (default: the current directory's repository)
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Executable the shims should call (default: this git-hooks binary)
    #[arg(long, value_name = "PATH")]
    pub runner: Option<PathBuf>,
}

impl Command for InstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let installer = Installer::discover(&context.start_dir(self.repo.as_deref()))?;

        let runner = match &self.runner {
            Some(runner) => context.cwd().join(runner).into_path_buf(),
            None => std::env::current_exe().map_err(CommandError::RunnerPath)?,
        };

        installer.install(&runner)?;

        println!(
            "{} git-hooks installed in {}",
            "✓".green(),
            installer.hooks_dir().display().cyan()
        );
        println!(
            "  Original hooks saved to {}",
            installer.backup_dir().display().dimmed()
        );
        Ok(())
    }
}

/// Uninstall command
#[derive(Debug, Args)]
pub struct UninstallCommand {
    /// Repository to uninstall from (default: the current directory's repository)
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,
}

impl Command for UninstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let installer = Installer::discover(&context.start_dir(self.repo.as_deref()))?;
        installer.uninstall()?;

        println!(
            "{} git-hooks uninstalled, original hooks restored in {}",
            "✓".green(),
            installer.hooks_dir().display().cyan()
        );
        Ok(())
    }
}
