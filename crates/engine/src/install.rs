//! Shim installation
//!
//! Installing moves the repository's `hooks` directory aside to `hooks.old`
//! and fills a fresh `hooks` directory with one shim per hook type. Each shim
//! forwards to `git-hooks run`. Uninstalling deletes the shims and puts the
//! backup back. The backup doubles as the installation marker.

use crate::git;
use githooks_core::{Error, HookType, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the directory Git reads hooks from
pub const HOOKS_DIR: &str = "hooks";

/// Name of the backup of the user's original hooks directory
pub const BACKUP_DIR: &str = "hooks.old";

#[cfg(unix)]
const SHIM_MODE: u32 = 0o755;

/// Installs and removes shims in one repository
#[derive(Debug, Clone)]
pub struct Installer {
    git_dir: PathBuf,
}

impl Installer {
    /// Installer for an explicit git directory
    #[must_use]
    pub fn new(git_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_dir: git_dir.into(),
        }
    }

    /// Installer for the repository containing `start`
    pub fn discover(start: &Path) -> Result<Self> {
        git::find_git_dir(start).map(Self::new)
    }

    #[must_use]
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    #[must_use]
    pub fn hooks_dir(&self) -> PathBuf {
        self.git_dir.join(HOOKS_DIR)
    }

    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        self.git_dir.join(BACKUP_DIR)
    }

    /// Whether shims are currently installed
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.backup_dir().exists()
    }

    /// Back up the hooks directory and write a shim for every hook type
    ///
    /// `runner` is the `git-hooks` executable the shims will call.
    ///
    /// If writing the shims fails, the partial `hooks` directory is removed
    /// and the original one is put back, leaving the repository uninstalled.
    #[tracing::instrument(skip(self), fields(git_dir = %self.git_dir.display()))]
    pub fn install(&self, runner: &Path) -> Result<()> {
        self.install_with(runner, write_shim)
    }

    fn install_with(&self, runner: &Path, write: ShimWriter) -> Result<()> {
        if self.is_installed() {
            return Err(Error::AlreadyInstalled {
                git_dir: self.git_dir.clone(),
            });
        }

        let hooks = self.hooks_dir();
        let backup = self.backup_dir();

        let moved = hooks.exists();
        if moved {
            tracing::debug!("Backing up {} to {}", hooks.display(), backup.display());
            fs::rename(&hooks, &backup)?;
        } else {
            // Nothing to back up, but the marker still has to exist
            fs::create_dir(&backup)?;
        }

        if let Err(e) = populate(&hooks, runner, write) {
            tracing::warn!(error = %e, "Failed to write hook shims, rolling back");
            if let Err(rollback) = self.rollback(moved) {
                tracing::warn!(error = %rollback, "Rollback incomplete");
            }
            return Err(e);
        }

        tracing::info!(count = HookType::ALL.len(), "Installed hook shims");
        Ok(())
    }

    /// Undo a partial install
    fn rollback(&self, moved: bool) -> Result<()> {
        let hooks = self.hooks_dir();
        let backup = self.backup_dir();

        if fs::symlink_metadata(&hooks).is_ok() {
            remove_tree(&hooks)?;
        }
        if moved {
            fs::rename(&backup, &hooks)?;
        } else {
            fs::remove_dir(&backup)?;
        }
        Ok(())
    }

    /// Remove the shims and restore the backed up hooks directory
    ///
    /// Without a backup the hooks directory is left as it is.
    #[tracing::instrument(skip(self), fields(git_dir = %self.git_dir.display()))]
    pub fn uninstall(&self) -> Result<()> {
        let hooks = self.hooks_dir();
        let backup = self.backup_dir();

        if !hooks.is_dir() || !backup.is_dir() {
            return Err(Error::NotInstalled {
                git_dir: self.git_dir.clone(),
            });
        }

        remove_tree(&hooks)?;
        fs::rename(&backup, &hooks)?;

        tracing::info!("Restored original hooks directory");
        Ok(())
    }
}

/// Shell script installed as `.git/hooks/<name>`
///
/// The runner path is fixed at install time. A missing runner must not block
/// commits, so the shim reports the problem and exits 0.
#[must_use]
pub fn render_shim(runner: &Path) -> String {
    let runner = shell_words::quote(&runner.to_string_lossy()).into_owned();
    format!(
        r#"#!/bin/sh
# Installed by git-hooks. Run `git-hooks uninstall` to restore the original hooks.
runner={runner}

if [ ! -x "$runner" ]; then
  echo "[GIT-HOOKS ERROR] git-hooks runner not found: $runner" >&2
  echo "[GIT-HOOKS ERROR] Please reinstall git-hooks to fix this error" >&2
  exit 0
fi

exec "$runner" run -- "$0" "$@"
"#
    )
}

type ShimWriter = fn(&Path, &str) -> Result<()>;

fn populate(hooks: &Path, runner: &Path, write: ShimWriter) -> Result<()> {
    fs::create_dir(hooks)?;

    let shim = render_shim(runner);
    for hook in HookType::ALL {
        write(&hooks.join(hook.name()), &shim)?;
    }
    Ok(())
}

fn write_shim(path: &Path, shim: &str) -> Result<()> {
    fs::write(path, shim)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(SHIM_MODE))?;
    }

    Ok(())
}

/// Delete a directory tree without following symlinks
fn remove_tree(dir: &Path) -> Result<()> {
    for entry in WalkDir::new(dir).follow_links(false).contents_first(true) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
