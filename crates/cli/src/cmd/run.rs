//! Run command implementation
//!
//! Entry point of every installed shim. Reads the stdin payload Git provides,
//! dispatches the hooks for the event and reports the exit code to use.

use clap::Args;
use githooks_engine::Dispatcher;
use githooks_engine::ignore::{GitCheckIgnore, IgnoreOracle, NoIgnore};
use std::ffi::OsString;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;

/// Prefix for errors reported back to the Git user
pub const ERROR_PREFIX: &str = "[GIT-HOOKS ERROR]";

/// Run command
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Run every hook, even those matched by ignore rules
    #[arg(long)]
    pub no_ignore: bool,

    /// Git executable used to evaluate ignore rules
    #[arg(long, env = "GIT_HOOKS_GIT", value_name = "PATH")]
    pub git: Option<PathBuf>,

    /// Hook file Git invoked, e.g. `.git/hooks/pre-commit`
    #[arg(value_name = "HOOK_FILE", required = true)]
    pub hook_file: PathBuf,

    /// Arguments Git passed to the hook
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<OsString>,
}

impl RunCommand {
    fn ignore_oracle(&self) -> Box<dyn IgnoreOracle> {
        if self.no_ignore {
            return Box::new(NoIgnore);
        }
        match &self.git {
            Some(git) => Box::new(GitCheckIgnore::with_git(git)),
            None => Box::new(GitCheckIgnore::new()),
        }
    }
}

impl Command for RunCommand {
    /// Exit code for the shim
    type Output = i32;

    fn execute(&self, context: &RuntimeContext) -> Result<i32> {
        let stdin = read_stdin()?;
        let hook_file = context.cwd().join(&self.hook_file);

        let dispatcher = Dispatcher::builder()
            .ignore_oracle(self.ignore_oracle())
            .build();
        let result = dispatcher.run(hook_file.as_path(), &self.args, &stdin);

        if let Some(error) = &result.error {
            eprintln!("{ERROR_PREFIX} {error}");
        }

        Ok(result.final_code)
    }
}

/// Read the whole stdin payload, unless stdin is an interactive terminal
fn read_stdin() -> Result<Vec<u8>> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Vec::new());
    }

    let mut buffer = Vec::new();
    stdin.read_to_end(&mut buffer)?;
    tracing::debug!(bytes = buffer.len(), "Read hook stdin");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(no_ignore: bool, git: Option<&str>) -> RunCommand {
        RunCommand {
            no_ignore,
            git: git.map(PathBuf::from),
            hook_file: PathBuf::from(".git/hooks/pre-commit"),
            args: Vec::new(),
        }
    }

    #[test]
    fn test_no_ignore_disables_oracle() {
        assert_eq!(
            command(true, Some("/usr/bin/git")).ignore_oracle().name(),
            "none"
        );
    }

    #[test]
    fn test_git_check_ignore_by_default() {
        assert_eq!(
            command(false, None).ignore_oracle().name(),
            "git check-ignore"
        );
        assert_eq!(
            command(false, Some("/opt/git/bin/git")).ignore_oracle().name(),
            "git check-ignore"
        );
    }
}
