//! Hook discovery
//!
//! Hooks for a Git event live in `<project>/.githooks/<hook-type>/`, outside
//! of `.git` so they survive re-clones and can be committed. Every entry of
//! that directory is a candidate; execution order is the byte order of entry
//! names, so `01-lint`, `02-test` run in that order.

use crate::executable::ExecutableStrategy;
use crate::resolve::{self, ResolvedEntry};
use githooks_core::{AbsPath, HookType, Result};
use std::cell::OnceCell;
use std::ffi::OsString;
use std::fs;
use std::io;

/// Directory under the project root holding per-hook-type directories
pub const HOOKS_DIRNAME: &str = ".githooks";

/// One entry found in a per-hook-type directory
#[derive(Debug)]
pub struct HookCandidate {
    name: String,
    path: AbsPath,
    resolved: OnceCell<Option<ResolvedEntry>>,
}

/// What would happen to a candidate if it were dispatched now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStatus {
    /// Regular executable file (possibly behind symlinks)
    Runnable,
    /// Regular file without execute permission for this process
    NonExecutable,
    /// Dangling or looping symlink
    Broken,
    /// Directory or special file
    NotAFile,
}

impl CandidateStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CandidateStatus::Runnable => "runnable",
            CandidateStatus::NonExecutable => "non-executable",
            CandidateStatus::Broken => "broken link",
            CandidateStatus::NotAFile => "not a file",
        }
    }
}

impl HookCandidate {
    #[must_use]
    pub fn new(name: impl Into<String>, path: AbsPath) -> Self {
        Self {
            name: name.into(),
            path,
            resolved: OnceCell::new(),
        }
    }

    /// Directory entry name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the entry itself, before following links
    #[must_use]
    pub fn path(&self) -> &AbsPath {
        &self.path
    }

    /// Follow symlinks to the final entry, once
    ///
    /// `None` means the link chain is broken.
    pub fn resolve(&self) -> Result<Option<&ResolvedEntry>> {
        if let Some(entry) = self.resolved.get() {
            return Ok(entry.as_ref());
        }
        let entry = resolve::resolve(self.path.as_path())?;
        Ok(self.resolved.get_or_init(|| entry).as_ref())
    }

    /// Classify the candidate under `strategy`
    pub fn status(&self, strategy: &dyn ExecutableStrategy) -> Result<CandidateStatus> {
        let Some(entry) = self.resolve()? else {
            return Ok(CandidateStatus::Broken);
        };

        if !strategy.is_regular_file(&entry.stat) {
            Ok(CandidateStatus::NotAFile)
        } else if strategy.is_executable(&entry.stat) {
            Ok(CandidateStatus::Runnable)
        } else {
            Ok(CandidateStatus::NonExecutable)
        }
    }
}

/// Lists hook candidates of a project
#[derive(Debug, Clone)]
pub struct HookDiscovery {
    project_root: AbsPath,
}

impl HookDiscovery {
    #[must_use]
    pub fn new(project_root: AbsPath) -> Self {
        Self { project_root }
    }

    #[must_use]
    pub fn project_root(&self) -> &AbsPath {
        &self.project_root
    }

    /// `<project>/.githooks/<hook>`
    #[must_use]
    pub fn hooks_dir(&self, hook: HookType) -> AbsPath {
        self.project_root.join(HOOKS_DIRNAME).join(hook.name())
    }

    /// Check if the per-hook-type directory exists
    #[must_use]
    pub fn exists(&self, hook: HookType) -> bool {
        self.hooks_dir(hook).as_path().is_dir()
    }

    /// List candidates for `hook` in execution order
    ///
    /// A missing directory yields an empty list.
    pub fn list(&self, hook: HookType) -> Result<Vec<HookCandidate>> {
        let dir = self.hooks_dir(hook);

        let read_dir = match fs::read_dir(dir.as_path()) {
            Ok(read_dir) => read_dir,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                tracing::debug!("Hooks directory does not exist: {}", dir);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries: Vec<OsString> = Vec::new();
        for entry in read_dir {
            entries.push(entry?.file_name());
        }

        // Byte order of the raw names is the execution order
        entries.sort();

        let candidates: Vec<HookCandidate> = entries
            .into_iter()
            .map(|name| {
                let path = dir.join(&name);
                HookCandidate::new(name.to_string_lossy(), path)
            })
            .collect();

        tracing::debug!(hook = %hook, count = candidates.len(), "Discovered hook candidates");
        Ok(candidates)
    }
}
