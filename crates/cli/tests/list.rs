//! `list` output when stdout is not a terminal
#![cfg(unix)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

const GIT_HOOKS: &str = env!("CARGO_BIN_EXE_git-hooks");

#[test]
fn test_piped_list_output_is_plain_text() {
    let temp = TempDir::new().unwrap();
    git2::Repository::init(temp.path()).unwrap();
    let dir = temp.path().join(".githooks/pre-commit");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("01-lint"), "#!/bin/sh\n").unwrap();
    fs::set_permissions(dir.join("01-lint"), fs::Permissions::from_mode(0o755)).unwrap();
    fs::write(dir.join("02-plain"), "#!/bin/sh\n").unwrap();
    fs::set_permissions(dir.join("02-plain"), fs::Permissions::from_mode(0o644)).unwrap();

    let output = duct::cmd(GIT_HOOKS, ["list", "--no-ignore"])
        .dir(temp.path())
        .env_remove("FORCE_COLOR")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("GIT_HOOKS_LOG_FILE")
        .stdout_capture()
        .stderr_null()
        .run()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains('\u{1b}'), "stdout: {stdout:?}");
    assert!(stdout.starts_with("pre-commit (2 hooks)\n"), "stdout: {stdout:?}");
    assert!(stdout.contains("  • 01-lint\n"));
    assert!(stdout.contains("  • 02-plain [non-executable]\n"));
}
