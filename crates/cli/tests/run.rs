//! The `run` subcommand as the shims invoke it
#![cfg(unix)]
#![allow(clippy::unwrap_used)]

use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GIT_HOOKS: &str = env!("CARGO_BIN_EXE_git-hooks");

fn project(hook: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".git/hooks")).unwrap();
    fs::create_dir_all(temp.path().join(".githooks").join(hook)).unwrap();
    temp
}

fn add_hook(root: &Path, hook: &str, name: &str, body: &str) -> PathBuf {
    let path = root.join(".githooks").join(hook).join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn git_hooks_run(root: &Path, args: &[&str]) -> duct::Expression {
    let mut argv = vec!["run", "--no-ignore", "--"];
    argv.extend_from_slice(args);
    duct::cmd(GIT_HOOKS, argv)
        .dir(root)
        .env_remove("GIT_HOOKS_LOG_FILE")
        .stdout_capture()
        .stderr_capture()
        .unchecked()
}

#[test]
#[serial]
fn test_run_forwards_arguments_and_reports_first_failure() {
    let temp = project("pre-push");
    let root = temp.path();
    let log = root.join("hooks.log");
    add_hook(
        root,
        "pre-push",
        "01-record",
        &format!(
            "printf '%s|' \"$@\" >> '{log}'\ncat >> '{log}'",
            log = log.display()
        ),
    );
    add_hook(root, "pre-push", "02-reject", "exit 7");
    add_hook(
        root,
        "pre-push",
        "03-never",
        &format!("echo never >> '{}'", log.display()),
    );

    let hook_file = root.join(".git/hooks/pre-push");
    let output = git_hooks_run(
        root,
        &[hook_file.to_str().unwrap(), "origin", "--force-with-lease"],
    )
    .stdin_bytes("refs/heads/main abc refs/heads/main def\n")
    .run()
    .unwrap();

    assert_eq!(output.status.code(), Some(7));
    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "origin|--force-with-lease|refs/heads/main abc refs/heads/main def\n"
    );
}

#[test]
#[serial]
fn test_run_with_relative_hook_file() {
    let temp = project("pre-commit");
    let root = temp.path();
    let marker = root.join("ran");
    add_hook(
        root,
        "pre-commit",
        "check",
        &format!("touch '{}'", marker.display()),
    );

    let output = git_hooks_run(root, &[".git/hooks/pre-commit"])
        .stdin_null()
        .run()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(marker.exists());
}

#[test]
#[serial]
fn test_run_prints_error_for_hook_that_cannot_start() {
    let temp = project("pre-commit");
    let root = temp.path();
    let bad = add_hook(root, "pre-commit", "01-bad", "");
    fs::write(&bad, "#!/nonexistent/interpreter\n").unwrap();

    let hook_file = root.join(".git/hooks/pre-commit");
    let output = git_hooks_run(root, &[hook_file.to_str().unwrap()])
        .stdin_null()
        .run()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[GIT-HOOKS ERROR]"), "stderr: {stderr}");
    assert!(stderr.contains("01-bad"), "stderr: {stderr}");
}

#[test]
#[serial]
fn test_run_rejects_unknown_hook_name() {
    let temp = project("pre-commit");
    let root = temp.path();

    let hook_file = root.join(".git/hooks/pre-commit.sample");
    let output = git_hooks_run(root, &[hook_file.to_str().unwrap()])
        .stdin_null()
        .run()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("[GIT-HOOKS ERROR] Unknown hook type"),
        "stderr: {stderr}"
    );
}
