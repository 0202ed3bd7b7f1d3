//! Hook dispatch
//!
//! Git invokes `.git/hooks/<name>`; the installed shim forwards the call here.
//! The dispatcher works out which event fired and where the project lives
//! from that path, then runs every candidate for the event in order, stopping
//! at the first failure.

use super::discovery::HookDiscovery;
use super::executor::HookExecutor;
use crate::executable::{ExecutableStrategy, platform_strategy};
use crate::ignore::{GitCheckIgnore, IgnoreFilter, IgnoreOracle};
use githooks_core::{AbsPath, Error, HookType, Result};
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Exit code for failures of the dispatcher itself
pub const INTERNAL_ERROR_EXIT_CODE: i32 = 1;

/// Result of a full dispatch
#[derive(Debug, Default)]
pub struct DispatchResult {
    /// Code to exit with: 0, or the code of the first failing hook
    pub final_code: i32,
    /// Set when a hook could not be started or dispatch itself failed
    pub error: Option<Error>,
    /// Warnings already printed to stderr, in order
    pub warnings: Vec<String>,
}

impl DispatchResult {
    fn failed(error: Error) -> Self {
        Self {
            final_code: INTERNAL_ERROR_EXIT_CODE,
            error: Some(error),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.final_code == 0
    }
}

/// Runs the hooks for one Git event
///
/// # Examples
///
/// ```no_run
/// use githooks_engine::hooks::Dispatcher;
/// use githooks_engine::ignore::NoIgnore;
/// use std::path::Path;
///
/// let dispatcher = Dispatcher::builder()
///     .ignore_oracle(Box::new(NoIgnore))
///     .build();
/// let result = dispatcher.run(Path::new(".git/hooks/pre-commit"), &[], b"");
/// std::process::exit(result.final_code);
/// ```
pub struct Dispatcher<'a> {
    oracle: Box<dyn IgnoreOracle + 'a>,
    strategy: &'a dyn ExecutableStrategy,
    project_root: Option<AbsPath>,
}

impl<'a> Dispatcher<'a> {
    /// Dispatcher with the platform strategy and `git check-ignore`
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> DispatcherBuilder<'a> {
        DispatcherBuilder::new()
    }

    /// Run all hooks registered for `hook_file`
    ///
    /// `hook_file` is the path Git invoked, `.git/hooks/<name>`. Failures are
    /// reported in the result, never returned.
    #[tracing::instrument(skip(self, args, stdin), fields(hook_file = %hook_file.display()))]
    pub fn run(&self, hook_file: &Path, args: &[OsString], stdin: &[u8]) -> DispatchResult {
        let mut result = DispatchResult::default();
        if let Err(e) = self.dispatch(hook_file, args, stdin, &mut result) {
            tracing::debug!(error = %e, "Dispatch aborted");
            let warnings = std::mem::take(&mut result.warnings);
            result = DispatchResult::failed(e);
            result.warnings = warnings;
        }
        result
    }

    fn dispatch(
        &self,
        hook_file: &Path,
        args: &[OsString],
        stdin: &[u8],
        result: &mut DispatchResult,
    ) -> Result<()> {
        let hook = hook_type_of(hook_file)?;
        let root = match &self.project_root {
            Some(root) => root.clone(),
            None => project_root_of(hook_file)?,
        };
        tracing::debug!(%hook, project_root = %root, "Dispatching");

        let discovery = HookDiscovery::new(root);
        let candidates = discovery.list(hook)?;
        if candidates.is_empty() {
            return Ok(());
        }

        let candidates =
            IgnoreFilter::new(self.oracle.as_ref()).filter(discovery.project_root(), candidates);

        let executor = HookExecutor::new(self.strategy);
        for candidate in &candidates {
            let mut outcome = executor.execute(candidate, args, stdin);

            if let Some(warning) = outcome.warning.take() {
                eprintln!("[WARNING] {warning}");
                result.warnings.push(warning);
            }

            if !outcome.is_success() {
                tracing::debug!(
                    hook = candidate.name(),
                    exit_code = outcome.exit_code,
                    "Stopping after failed hook"
                );
                result.final_code = outcome.exit_code;
                result.error = outcome.error;
                return Ok(());
            }
        }

        Ok(())
    }
}

impl Default for Dispatcher<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Dispatcher`]
pub struct DispatcherBuilder<'a> {
    oracle: Box<dyn IgnoreOracle + 'a>,
    strategy: &'a dyn ExecutableStrategy,
    project_root: Option<AbsPath>,
}

impl<'a> DispatcherBuilder<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            oracle: Box::new(GitCheckIgnore::new()),
            strategy: platform_strategy(),
            project_root: None,
        }
    }

    /// Evaluate ignore rules with `oracle`
    #[must_use]
    pub fn ignore_oracle(mut self, oracle: Box<dyn IgnoreOracle + 'a>) -> Self {
        self.oracle = oracle;
        self
    }

    /// Decide executability and launch commands with `strategy`
    #[must_use]
    pub fn strategy(mut self, strategy: &'a dyn ExecutableStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Look for `.githooks` under `root` instead of deriving it from the hook file
    #[must_use]
    pub fn project_root(mut self, root: AbsPath) -> Self {
        self.project_root = Some(root);
        self
    }

    #[must_use]
    pub fn build(self) -> Dispatcher<'a> {
        Dispatcher {
            oracle: self.oracle,
            strategy: self.strategy,
            project_root: self.project_root,
        }
    }
}

impl Default for DispatcherBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook type named by the file Git invoked
pub fn hook_type_of(hook_file: &Path) -> Result<HookType> {
    hook_file
        .file_name()
        .and_then(OsStr::to_str)
        .ok_or_else(|| Error::UnknownHookType(hook_file.display().to_string()))?
        .parse()
}

/// Project root for a hook file at `<root>/.git/hooks/<name>`
pub fn project_root_of(hook_file: &Path) -> Result<AbsPath> {
    AbsPath::resolve(hook_file)?
        .normalized()
        .parent()
        .and_then(|hooks| hooks.parent())
        .and_then(|git_dir| git_dir.parent())
        .ok_or_else(|| {
            Error::Message(format!(
                "cannot derive project root from {}",
                hook_file.display()
            ))
        })
}
