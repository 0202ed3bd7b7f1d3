//! Repository lookup helpers backed by git2

use githooks_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Helper function to convert git2 errors to `githooks_core` errors
#[inline]
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn git_err(e: git2::Error) -> Error {
    Error::Git(e.message().to_string())
}

/// Find the git directory (usually `.git`) of the repository containing `start_path`
///
/// Searches upward from the given path, the same way `git` itself does.
pub fn find_git_dir(start_path: &Path) -> Result<PathBuf> {
    match git2::Repository::discover(start_path) {
        Ok(repo) => Ok(repo.path().to_path_buf()),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Err(Error::NotARepository {
            path: start_path.to_path_buf(),
        }),
        Err(e) => Err(git_err(e)),
    }
}

/// Find git working tree root starting from the given path
///
/// Returns `None` for bare repositories and paths outside any repository.
#[must_use]
pub fn find_working_tree(start_path: &Path) -> Option<PathBuf> {
    let repo = git2::Repository::discover(start_path).ok()?;
    repo.workdir().map(Path::to_path_buf)
}
