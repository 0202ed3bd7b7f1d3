//! Installed shims forward to the runner
#![cfg(unix)]
#![allow(clippy::unwrap_used)]

use githooks_engine::{Error, Installer};
use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn repository() -> TempDir {
    let temp = TempDir::new().unwrap();
    git2::Repository::init(temp.path()).unwrap();
    temp
}

/// Fake runner that records its argv and stdin
fn fake_runner(dir: &Path, log: &Path) -> PathBuf {
    let runner = dir.join("fake runner");
    fs::write(
        &runner,
        format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{log}'\ncat >> '{log}'\nexit 3\n",
            log = log.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&runner, fs::Permissions::from_mode(0o755)).unwrap();
    runner
}

#[test]
fn test_discover_from_subdirectory() {
    let repo = repository();
    let nested = repo.path().join("src/module");
    fs::create_dir_all(&nested).unwrap();

    let installer = Installer::discover(&nested).unwrap();
    assert_eq!(
        fs::canonicalize(installer.git_dir()).unwrap(),
        fs::canonicalize(repo.path().join(".git")).unwrap()
    );
}

#[test]
fn test_install_then_uninstall_round_trip() {
    let repo = repository();
    let installer = Installer::discover(repo.path()).unwrap();
    fs::create_dir_all(installer.hooks_dir()).unwrap();
    fs::write(
        installer.hooks_dir().join("pre-commit"),
        "#!/bin/sh\nexit 0\n",
    )
    .unwrap();
    let mut original: Vec<_> = fs::read_dir(installer.hooks_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();

    installer.install(Path::new("/usr/bin/git-hooks")).unwrap();
    assert!(installer.is_installed());
    assert!(matches!(
        installer.install(Path::new("/usr/bin/git-hooks")),
        Err(Error::AlreadyInstalled { .. })
    ));

    installer.uninstall().unwrap();
    assert!(!installer.is_installed());
    let mut restored: Vec<_> = fs::read_dir(installer.hooks_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    original.sort();
    restored.sort();
    assert_eq!(restored, original);

    assert!(matches!(installer.uninstall(), Err(Error::NotInstalled { .. })));
}

#[test]
#[serial]
fn test_shim_execs_runner_with_hook_path_args_and_stdin() {
    let repo = repository();
    let tools = TempDir::new().unwrap();
    let log = tools.path().join("runner.log");
    let runner = fake_runner(tools.path(), &log);

    let installer = Installer::discover(repo.path()).unwrap();
    installer.install(&runner).unwrap();
    let shim = installer.hooks_dir().join("pre-push");

    let output = duct::cmd(&shim, ["origin", "https://example.com/repo.git"])
        .stdin_bytes("refs/heads/main 1 refs/heads/main 2\n")
        .unchecked()
        .run()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        format!(
            "run\n--\n{}\norigin\nhttps://example.com/repo.git\nrefs/heads/main 1 refs/heads/main 2\n",
            shim.display()
        )
    );
}

#[test]
#[serial]
fn test_shim_with_missing_runner_does_not_block() {
    let repo = repository();
    let installer = Installer::discover(repo.path()).unwrap();
    installer
        .install(&repo.path().join("no-such-runner"))
        .unwrap();

    let output = duct::cmd!(installer.hooks_dir().join("pre-commit"))
        .stderr_capture()
        .unchecked()
        .run()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[GIT-HOOKS ERROR] git-hooks runner not found"));
    assert!(stderr.contains("Please reinstall git-hooks to fix this error"));
}
