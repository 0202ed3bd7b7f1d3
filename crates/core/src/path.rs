//! Absolute path handling
//!
//! [`AbsPath`] guarantees an absolute path. Hook files handed over by Git may
//! be relative to the working directory, and ignore filtering compares paths
//! reported by an external evaluator, so both sides are normalized lexically
//! before comparison.
//!
//! # Examples
//!
//! ```
//! use githooks_core::path::AbsPath;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let hook = AbsPath::new("/repo/.git/hooks/../hooks/pre-commit".into())?;
//! assert_eq!(
//!     hook.normalized().as_path(),
//!     std::path::Path::new("/repo/.git/hooks/pre-commit")
//! );
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// An absolute path on the filesystem
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbsPath(PathBuf);

impl AbsPath {
    /// Create a new `AbsPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_absolute() {
            Ok(AbsPath(path))
        } else {
            Err(Error::PathNotAbsolute { path })
        }
    }

    /// Make `path` absolute against the current working directory
    ///
    /// Symlinks are not resolved; only the current directory is prepended.
    pub fn resolve(path: &Path) -> Result<Self> {
        if path.is_absolute() {
            return Ok(AbsPath(path.to_path_buf()));
        }
        Ok(AbsPath(std::env::current_dir()?.join(path)))
    }

    /// Borrow the inner path
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Consume and return the inner `PathBuf`
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join a relative component onto this path
    #[must_use]
    pub fn join(&self, rel: impl AsRef<Path>) -> Self {
        AbsPath(self.0.join(rel))
    }

    /// Parent directory, if any
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|p| AbsPath(p.to_path_buf()))
    }

    /// Lexically remove `.` and `..` components
    ///
    /// `..` at the root stays at the root, matching how the OS treats `/..`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut out = PathBuf::new();
        for component in self.0.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    out.pop();
                }
                other => out.push(other.as_os_str()),
            }
        }
        AbsPath(out)
    }
}

impl AsRef<Path> for AbsPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for AbsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_rejects_relative_path() {
        let err = AbsPath::new(PathBuf::from(".git/hooks")).unwrap_err();
        assert!(matches!(err, Error::PathNotAbsolute { .. }));
    }

    #[test]
    fn test_resolve_relative_against_cwd() {
        let resolved = AbsPath::resolve(Path::new(".git/hooks/pre-push")).unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolved.as_path(), cwd.join(".git/hooks/pre-push"));
    }

    #[test]
    fn test_normalized_drops_dot_components() {
        let path =
            AbsPath::new(PathBuf::from("/repo/./.git/hooks/../../.githooks/pre-commit")).unwrap();
        assert_eq!(
            path.normalized().as_path(),
            Path::new("/repo/.githooks/pre-commit")
        );
    }

    #[test]
    fn test_normalized_parent_of_root_is_root() {
        let path = AbsPath::new(PathBuf::from("/../x")).unwrap();
        assert_eq!(path.normalized().as_path(), Path::new("/x"));
    }

    #[test]
    fn test_parent() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = AbsPath::new(tmp.path().join("pre-commit")).unwrap();

        assert_eq!(path.parent().unwrap().as_path(), tmp.path());
        assert!(AbsPath::new(PathBuf::from("/")).unwrap().parent().is_none());
    }
}
