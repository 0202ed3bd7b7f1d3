//! Command trait for git-hooks CLI
//!
//! Every subcommand implements [`Command`], so `run` can treat them alike and
//! tests can execute a command against a hand-built [`RuntimeContext`].

use crate::common::RuntimeContext;
use crate::error::Result;

/// Trait for all git-hooks commands
///
/// Commands can specify their return type via the `Output` associated type.
/// Most commands return `()`; `run` returns the exit code of the dispatch.
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command with the given runtime context
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute. Error messages should
    /// be descriptive enough for the user to understand what went wrong.
    fn execute(&self, context: &RuntimeContext) -> Result<Self::Output>;
}
