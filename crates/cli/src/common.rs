//! Common utilities and types shared across CLI commands

use crate::error::{CommandError, Result};
use githooks_core::AbsPath;
use std::path::{Path, PathBuf};

/// State shared by all commands of one invocation
#[derive(Debug, Clone)]
pub struct RuntimeContext {
    cwd: AbsPath,
}

impl RuntimeContext {
    /// Context rooted at the process working directory
    pub fn new() -> Result<Self> {
        Ok(Self::with_cwd(AbsPath::new(std::env::current_dir()?)?))
    }

    /// Context rooted at an explicit directory
    #[must_use]
    pub fn with_cwd(cwd: AbsPath) -> Self {
        Self { cwd }
    }

    #[must_use]
    pub fn cwd(&self) -> &AbsPath {
        &self.cwd
    }

    /// Directory a repository lookup starts from
    ///
    /// A relative `repo` is taken relative to the working directory.
    #[must_use]
    pub fn start_dir(&self, repo: Option<&Path>) -> PathBuf {
        match repo {
            Some(dir) => self.cwd.as_path().join(dir),
            None => self.cwd.as_path().to_path_buf(),
        }
    }

    /// Working tree of the repository containing `repo` (or the working directory)
    pub fn work_tree(&self, repo: Option<&Path>) -> Result<AbsPath> {
        let start = self.start_dir(repo);
        let root = githooks_engine::git::find_working_tree(&start)
            .ok_or(CommandError::NotInWorkTree(start))?;
        Ok(AbsPath::resolve(&root)?.normalized())
    }
}
