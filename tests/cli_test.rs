// tests/cli_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn scm_version(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--bin", "scm-version", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn tagged_repo(tag: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["config", "user.email", "tester@example.com"]);
    git(dir.path(), &["config", "user.name", "Tester"]);
    git(dir.path(), &["config", "commit.gpgsign", "false"]);
    fs::write(dir.path().join("README"), "hello\n").unwrap();
    git(dir.path(), &["add", "-A"]);
    git(dir.path(), &["commit", "-q", "-m", "initial commit"]);
    git(dir.path(), &["tag", tag]);
    dir
}

#[test]
fn test_help_screen() {
    let output = scm_version(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("scm-version"));
    assert!(stdout.contains("PEP 440"));
}

#[test]
fn test_prints_version_for_checkout_path() {
    let dir = tagged_repo("v1.2");
    let output = scm_version(&[dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "1.2");
}

#[test]
fn test_build_info_output() {
    let dir = tagged_repo("v1.2");
    let output = scm_version(&["--build-info", "mypkg", dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "mypkg 1 2");
}

#[test]
fn test_invalid_path_is_fatal() {
    let output = scm_version(&["/no/such/checkout/anywhere"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to resolve version"));
}
