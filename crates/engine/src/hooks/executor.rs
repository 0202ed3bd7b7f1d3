//! Single hook execution
//!
//! Runs one candidate as a child process and waits for it. The child shares
//! our stdout and stderr so its output reaches the Git operation as it is
//! produced; the stdin payload Git handed to us is written to the child and
//! the pipe is closed.

use super::discovery::{CandidateStatus, HookCandidate};
use crate::executable::{ExecutableStrategy, Launch};
use githooks_core::Error;
use std::ffi::OsString;
use std::process::ExitStatus;

/// Exit code reported for a hook killed by a signal
pub const SIGNAL_EXIT_CODE: i32 = 255;

/// Exit code reported when a hook could not be started
pub const SPAWN_FAILURE_EXIT_CODE: i32 = 1;

/// Warning attached to candidates without execute permission
pub const NON_EXECUTABLE_WARNING: &str = "non-executable file is skipped";

/// Result of running (or skipping) one candidate
#[derive(Debug)]
pub struct ExecutionOutcome {
    pub exit_code: i32,
    pub skipped: bool,
    pub warning: Option<String>,
    /// Set when the hook could not be started at all
    pub error: Option<Error>,
}

impl ExecutionOutcome {
    fn exited(exit_code: i32) -> Self {
        Self {
            exit_code,
            skipped: false,
            warning: None,
            error: None,
        }
    }

    fn skipped(warning: Option<String>) -> Self {
        Self {
            exit_code: 0,
            skipped: true,
            warning,
            error: None,
        }
    }

    fn failed(error: Error) -> Self {
        Self {
            exit_code: SPAWN_FAILURE_EXIT_CODE,
            skipped: false,
            warning: None,
            error: Some(error),
        }
    }

    /// Whether dispatch may continue with the next candidate
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs hook candidates one at a time
pub struct HookExecutor<'a> {
    strategy: &'a dyn ExecutableStrategy,
}

impl<'a> HookExecutor<'a> {
    #[must_use]
    pub fn new(strategy: &'a dyn ExecutableStrategy) -> Self {
        Self { strategy }
    }

    /// Run `candidate` with `args` and `stdin`, blocking until it exits
    #[tracing::instrument(skip(self, args, stdin), fields(hook = %candidate.name()))]
    pub fn execute(
        &self,
        candidate: &HookCandidate,
        args: &[OsString],
        stdin: &[u8],
    ) -> ExecutionOutcome {
        let status = match candidate.status(self.strategy) {
            Ok(status) => status,
            Err(e) => return ExecutionOutcome::failed(e),
        };

        match status {
            CandidateStatus::Runnable => {}
            CandidateStatus::Broken | CandidateStatus::NotAFile => {
                tracing::debug!(reason = status.label(), "Skipping hook");
                return ExecutionOutcome::skipped(None);
            }
            CandidateStatus::NonExecutable => {
                return ExecutionOutcome::skipped(Some(format!(
                    "{NON_EXECUTABLE_WARNING}: {}",
                    candidate.path()
                )));
            }
        }

        let launch = match self.strategy.launch(candidate.path().as_path()) {
            Ok(launch) => launch,
            Err(e) => return ExecutionOutcome::failed(e),
        };

        spawn(candidate, launch, args, stdin)
    }
}

fn spawn(
    candidate: &HookCandidate,
    launch: Launch,
    args: &[OsString],
    stdin: &[u8],
) -> ExecutionOutcome {
    let mut argv = launch.args;
    argv.extend(args.iter().cloned());

    tracing::debug!(
        program = %launch.program.to_string_lossy(),
        args = ?argv,
        stdin_bytes = stdin.len(),
        "Starting hook"
    );

    let start = std::time::Instant::now();
    let result = duct::cmd(launch.program, argv)
        .stdin_bytes(stdin.to_vec())
        .unchecked()
        .run();
    let elapsed = start.elapsed();

    match result {
        Ok(output) => {
            let exit_code = exit_code(output.status);
            if exit_code == 0 {
                tracing::debug!(
                    elapsed_ms = elapsed.as_millis(),
                    "Hook completed successfully"
                );
            } else {
                tracing::debug!(elapsed_ms = elapsed.as_millis(), exit_code, "Hook failed");
            }
            ExecutionOutcome::exited(exit_code)
        }
        Err(source) => {
            tracing::debug!(error = %source, "Failed to start hook");
            ExecutionOutcome::failed(Error::Spawn {
                path: candidate.path().as_path().to_path_buf(),
                source,
            })
        }
    }
}

/// Map a process status to the code reported back to Git
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(SIGNAL_EXIT_CODE)
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::executable::PosixPermissions;
    use githooks_core::AbsPath;
    use serial_test::serial;
    use std::fs;
    use std::os::unix::fs::{PermissionsExt, symlink};
    use std::path::Path;
    use tempfile::TempDir;

    fn candidate(path: &Path) -> HookCandidate {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        HookCandidate::new(name, AbsPath::new(path.to_path_buf()).unwrap())
    }

    fn script(dir: &Path, name: &str, body: &str, mode: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    #[serial]
    fn test_success_exit_code() {
        let temp = TempDir::new().unwrap();
        let hook = script(temp.path(), "ok", "exit 0", 0o755);
        let strategy = PosixPermissions::current();

        let outcome = HookExecutor::new(&strategy).execute(&candidate(&hook), &[], b"");
        assert!(outcome.is_success());
        assert!(!outcome.skipped);
        assert!(outcome.error.is_none());
    }

    #[test]
    #[serial]
    fn test_non_zero_exit_code_is_reported() {
        let temp = TempDir::new().unwrap();
        let hook = script(temp.path(), "fail", "exit 3", 0o755);
        let strategy = PosixPermissions::current();

        let outcome = HookExecutor::new(&strategy).execute(&candidate(&hook), &[], b"");
        assert_eq!(outcome.exit_code, 3);
        assert!(outcome.error.is_none());
    }

    #[test]
    #[serial]
    fn test_signal_maps_to_255() {
        let temp = TempDir::new().unwrap();
        let hook = script(temp.path(), "killed", "kill -KILL $$", 0o755);
        let strategy = PosixPermissions::current();

        let outcome = HookExecutor::new(&strategy).execute(&candidate(&hook), &[], b"");
        assert_eq!(outcome.exit_code, SIGNAL_EXIT_CODE);
    }

    #[test]
    #[serial]
    fn test_args_and_stdin_are_forwarded() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("log");
        let body = format!(
            "printf '%s\\n' \"$@\" > '{log}'\ncat >> '{log}'",
            log = log.display()
        );
        let hook = script(temp.path(), "echo", &body, 0o755);
        let strategy = PosixPermissions::current();

        let args = vec![OsString::from("origin"), OsString::from("two words")];
        let outcome = HookExecutor::new(&strategy).execute(
            &candidate(&hook),
            &args,
            b"refs/heads/main 1234\n",
        );
        assert!(outcome.is_success());
        assert_eq!(
            fs::read_to_string(&log).unwrap(),
            "origin\ntwo words\nrefs/heads/main 1234\n"
        );
    }

    #[test]
    fn test_non_executable_is_skipped_with_warning() {
        let temp = TempDir::new().unwrap();
        let hook = script(temp.path(), "plain", "exit 1", 0o644);
        let strategy = PosixPermissions::current();

        let outcome = HookExecutor::new(&strategy).execute(&candidate(&hook), &[], b"");
        assert!(outcome.skipped);
        assert!(outcome.is_success());
        assert!(outcome.warning.unwrap().starts_with(NON_EXECUTABLE_WARNING));
    }

    #[test]
    fn test_broken_link_is_skipped_silently() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("dangling");
        symlink("nowhere", &link).unwrap();
        let strategy = PosixPermissions::current();

        let outcome = HookExecutor::new(&strategy).execute(&candidate(&link), &[], b"");
        assert!(outcome.skipped);
        assert!(outcome.warning.is_none());
        assert!(outcome.is_success());
    }

    #[test]
    fn test_directory_is_skipped_silently() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");
        fs::create_dir(&dir).unwrap();
        let strategy = PosixPermissions::current();

        let outcome = HookExecutor::new(&strategy).execute(&candidate(&dir), &[], b"");
        assert!(outcome.skipped);
        assert!(outcome.warning.is_none());
    }

    #[test]
    #[serial]
    fn test_spawn_failure_sets_error() {
        let temp = TempDir::new().unwrap();
        // Executable bit set but no valid interpreter: exec fails with ENOENT
        let hook = temp.path().join("bad-interpreter");
        fs::write(&hook, "#!/nonexistent/interpreter\n").unwrap();
        fs::set_permissions(&hook, fs::Permissions::from_mode(0o755)).unwrap();
        let strategy = PosixPermissions::current();

        let outcome = HookExecutor::new(&strategy).execute(&candidate(&hook), &[], b"");
        assert_eq!(outcome.exit_code, SPAWN_FAILURE_EXIT_CODE);
        assert!(matches!(outcome.error, Some(Error::Spawn { .. })));
    }
}
