//! Ignore-rule filtering
//!
//! Candidates matched by the repository's ignore rules never run. The rules
//! are evaluated by an [`IgnoreOracle`], asked once per dispatch with the
//! whole batch of candidate paths. If the oracle fails, nothing is treated as
//! ignored: skipping a hook by mistake is worse than running one.

use crate::git::git_err;
use crate::hooks::HookCandidate;
use githooks_core::{AbsPath, Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Answers which of a batch of paths are ignored
pub trait IgnoreOracle {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Return the subset of `paths` that is ignored
    ///
    /// `root` is the working tree the paths live in. Returned paths may be
    /// absolute or relative to `root`.
    fn ignored(&self, root: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>>;
}

/// Never ignores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIgnore;

impl IgnoreOracle for NoIgnore {
    fn name(&self) -> &'static str {
        "none"
    }

    fn ignored(&self, _root: &Path, _paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }
}

/// Runs `git check-ignore --stdin -z` once per batch
#[derive(Debug, Clone)]
pub struct GitCheckIgnore {
    git: PathBuf,
}

impl GitCheckIgnore {
    /// Use the `git` found on `PATH`
    #[must_use]
    pub fn new() -> Self {
        let git = which::which("git").unwrap_or_else(|e| {
            tracing::debug!("git not found on PATH: {e}");
            PathBuf::from("git")
        });
        Self { git }
    }

    /// Use a specific git executable
    #[must_use]
    pub fn with_git(git: impl Into<PathBuf>) -> Self {
        Self { git: git.into() }
    }
}

impl Default for GitCheckIgnore {
    fn default() -> Self {
        Self::new()
    }
}

impl IgnoreOracle for GitCheckIgnore {
    fn name(&self) -> &'static str {
        "git check-ignore"
    }

    #[tracing::instrument(skip(self, paths), fields(git = %self.git.display(), count = paths.len()))]
    fn ignored(&self, root: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let mut input = Vec::new();
        for path in paths {
            let rel = path.strip_prefix(root).unwrap_or(path);
            input.extend_from_slice(rel.as_os_str().as_encoded_bytes());
            input.push(0);
        }

        let output = duct::cmd(&self.git, ["check-ignore", "--stdin", "-z"])
            .dir(root)
            .stdin_bytes(input)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|e| {
                Error::IgnoreCheck(format!("failed to run {}: {e}", self.git.display()))
            })?;

        // 0: something matched, 1: nothing matched, anything else is fatal
        match output.status.code() {
            Some(0) => {}
            Some(1) => return Ok(Vec::new()),
            code => {
                return Err(Error::IgnoreCheck(format!(
                    "git check-ignore exited with {}: {}",
                    code.map_or_else(|| "a signal".to_string(), |c| c.to_string()),
                    String::from_utf8_lossy(&output.stderr).trim()
                )));
            }
        }

        Ok(output
            .stdout
            .split(|b| *b == 0)
            .filter(|raw| !raw.is_empty())
            .map(|raw| root.join(path_from_bytes(raw)))
            .collect())
    }
}

#[cfg(unix)]
fn path_from_bytes(raw: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(raw))
}

#[cfg(not(unix))]
fn path_from_bytes(raw: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(raw).into_owned())
}

/// Evaluates ignore rules in-process with libgit2
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Ignore;

impl IgnoreOracle for Git2Ignore {
    fn name(&self) -> &'static str {
        "libgit2"
    }

    fn ignored(&self, root: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let repo = git2::Repository::open(root).map_err(git_err)?;

        let mut ignored = Vec::new();
        for path in paths {
            let rel = path.strip_prefix(root).unwrap_or(path);
            if repo.is_path_ignored(rel).map_err(git_err)? {
                ignored.push(path.clone());
            }
        }
        Ok(ignored)
    }
}

/// Removes ignored candidates from a discovery result
pub struct IgnoreFilter<'a> {
    oracle: &'a dyn IgnoreOracle,
}

impl<'a> IgnoreFilter<'a> {
    #[must_use]
    pub fn new(oracle: &'a dyn IgnoreOracle) -> Self {
        Self { oracle }
    }

    /// Keep only candidates that are not ignored, preserving order
    #[must_use]
    pub fn filter(&self, root: &AbsPath, candidates: Vec<HookCandidate>) -> Vec<HookCandidate> {
        self.partition(root, candidates).0
    }

    /// Split candidates into (kept, ignored), preserving order in both
    #[must_use]
    pub fn partition(
        &self,
        root: &AbsPath,
        candidates: Vec<HookCandidate>,
    ) -> (Vec<HookCandidate>, Vec<HookCandidate>) {
        if candidates.is_empty() {
            return (candidates, Vec::new());
        }

        let paths: Vec<PathBuf> = candidates
            .iter()
            .map(|c| c.path().as_path().to_path_buf())
            .collect();

        let ignored: HashSet<AbsPath> = match self.oracle.ignored(root.as_path(), &paths) {
            Ok(ignored) => ignored
                .into_iter()
                .map(|p| root.join(p).normalized())
                .collect(),
            Err(e) => {
                tracing::warn!(
                    oracle = self.oracle.name(),
                    error = %e,
                    "Ignore check failed, running all hooks"
                );
                return (candidates, Vec::new());
            }
        };

        candidates
            .into_iter()
            .partition(|c| !ignored.contains(&c.path().normalized()))
    }
}
