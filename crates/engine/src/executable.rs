//! Executability checks
//!
//! Whether a resolved hook may be run, and how to launch it, depends on the
//! platform. Unix hosts follow the permission bits of the file; hosts without
//! a POSIX permission model accept any regular file and launch it through
//! the interpreter named on its shebang line. The strategy is picked once per
//! process by [`platform_strategy`].

use crate::resolve::{EntryKind, FileStat};
use githooks_core::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

const OTHER_EXEC: u32 = 0o001;
const GROUP_EXEC: u32 = 0o010;
const OWNER_EXEC: u32 = 0o100;

/// Longest shebang line we bother reading
const SHEBANG_LIMIT: u64 = 1024;

/// Program and leading arguments used to start a hook
///
/// The dispatcher appends the hook's own arguments after `args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    pub program: OsString,
    pub args: Vec<OsString>,
}

/// Platform policy for deciding what can run and how
pub trait ExecutableStrategy: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Only plain files are ever run; directories and devices are skipped
    fn is_regular_file(&self, stat: &FileStat) -> bool {
        stat.kind == EntryKind::File
    }

    /// Whether the current process may execute a file with this stat
    fn is_executable(&self, stat: &FileStat) -> bool;

    /// Build the command line that runs `path`
    fn launch(&self, path: &Path) -> Result<Launch>;
}

/// Unix permission bits checked against the effective uid and gid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosixPermissions {
    uid: u32,
    gid: u32,
}

impl PosixPermissions {
    /// Check against explicit ids
    #[must_use]
    pub const fn with_ids(uid: u32, gid: u32) -> Self {
        Self { uid, gid }
    }

    /// Check against the ids of the running process
    #[cfg(unix)]
    #[must_use]
    pub fn current() -> Self {
        Self {
            uid: rustix::process::geteuid().as_raw(),
            gid: rustix::process::getegid().as_raw(),
        }
    }
}

impl ExecutableStrategy for PosixPermissions {
    fn name(&self) -> &'static str {
        "posix"
    }

    fn is_executable(&self, stat: &FileStat) -> bool {
        stat.mode & OTHER_EXEC != 0
            || (stat.mode & GROUP_EXEC != 0 && stat.gid == self.gid)
            || (stat.mode & OWNER_EXEC != 0 && stat.uid == self.uid)
    }

    fn launch(&self, path: &Path) -> Result<Launch> {
        Ok(Launch {
            program: path.as_os_str().to_owned(),
            args: Vec::new(),
        })
    }
}

/// Any regular file runs, through the interpreter on its shebang line
#[derive(Debug, Clone, Copy, Default)]
pub struct ShebangFallback;

impl ExecutableStrategy for ShebangFallback {
    fn name(&self) -> &'static str {
        "shebang"
    }

    fn is_executable(&self, stat: &FileStat) -> bool {
        self.is_regular_file(stat)
    }

    fn launch(&self, path: &Path) -> Result<Launch> {
        let (interpreter, args) = parse_shebang(path)?;

        let program = which::which(&interpreter).map_err(|e| Error::NoInterpreter {
            path: path.to_path_buf(),
            reason: format!("interpreter '{interpreter}' not found: {e}"),
        })?;

        let mut launch_args: Vec<OsString> = args.into_iter().map(OsString::from).collect();
        launch_args.push(path.as_os_str().to_owned());

        Ok(Launch {
            program: program.into_os_string(),
            args: launch_args,
        })
    }
}

static PLATFORM_STRATEGY: LazyLock<Box<dyn ExecutableStrategy>> = LazyLock::new(|| {
    #[cfg(unix)]
    let strategy: Box<dyn ExecutableStrategy> = Box::new(PosixPermissions::current());

    #[cfg(not(unix))]
    let strategy: Box<dyn ExecutableStrategy> = Box::new(ShebangFallback);

    tracing::debug!(
        strategy = strategy.name(),
        "Selected executability strategy"
    );
    strategy
});

/// Strategy for the host platform
#[must_use]
pub fn platform_strategy() -> &'static dyn ExecutableStrategy {
    PLATFORM_STRATEGY.as_ref()
}

/// Parse the shebang line of a script
///
/// Returns (interpreter, args)
///
/// # Examples
///
/// - `#!/bin/bash` → ("bash", [])
/// - `#!/usr/bin/env python3` → ("python3", [])
/// - `#!/bin/sh -e` → ("sh", ["-e"])
pub fn parse_shebang(script_path: &Path) -> Result<(String, Vec<String>)> {
    let no_interpreter = |reason: String| Error::NoInterpreter {
        path: script_path.to_path_buf(),
        reason,
    };

    let file = fs::File::open(script_path)?;
    let mut reader = BufReader::new(file.take(SHEBANG_LIMIT));
    let mut first_line = String::new();
    reader
        .read_line(&mut first_line)
        .map_err(|e| no_interpreter(format!("unreadable first line: {e}")))?;

    let Some(shebang) = first_line.strip_prefix("#!") else {
        return Err(no_interpreter("missing shebang line".to_string()));
    };

    let parts: Vec<&str> = shebang.split_whitespace().collect();
    let Some((&head, rest)) = parts.split_first() else {
        return Err(no_interpreter("empty shebang".to_string()));
    };

    // "#!/usr/bin/env interpreter args..."
    let head_name = interpreter_name(head);
    if head_name == "env" {
        let Some((&interpreter, args)) = rest.split_first() else {
            return Err(no_interpreter(format!(
                "invalid env shebang: {}",
                first_line.trim_end()
            )));
        };
        return Ok((
            interpreter.to_string(),
            args.iter().map(ToString::to_string).collect(),
        ));
    }

    Ok((
        head_name.to_string(),
        rest.iter().map(ToString::to_string).collect(),
    ))
}

/// Last component of an interpreter path, accepting both separators
fn interpreter_name(raw: &str) -> &str {
    raw.rsplit(['/', '\\']).next().unwrap_or(raw)
}
