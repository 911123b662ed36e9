//! SCM detection and subprocess plumbing.
//!
//! Every query against a checkout is a blocking external-process invocation
//! whose output streams are fully drained before the call returns. The exact
//! command lines and their output formats are a wire contract shared with the
//! `git` and `svn` binaries.

pub mod fallback;
pub mod git;

use std::io;
use std::path::Path;
use std::process::Command;

use crate::error::{Result, ScmVersionError};

/// Which source-control system governs a checkout directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScmKind {
    None,
    Git,
    Svn,
}

/// Detects which SCM (if any) governs `path`.
///
/// A missing repository, or a missing `git`/`svn` binary, is a normal
/// negative outcome and never an error; only unexpected I/O failures
/// propagate.
///
/// # Arguments
/// * `path` - Directory to probe
///
/// # Returns
/// * `Ok(ScmKind)` - The detected SCM kind, `ScmKind::None` if unrecognized
/// * `Err` - If a probe process could not be spawned for an unexpected reason
pub fn probe(path: &Path) -> Result<ScmKind> {
    if is_git(path)? {
        return Ok(ScmKind::Git);
    }
    if is_svn(path)? {
        return Ok(ScmKind::Svn);
    }
    Ok(ScmKind::None)
}

/// Returns true if `path` is inside a git repository.
///
/// Runs `git rev-parse --git-dir`; a non-empty stdout means git located a
/// repository. Errors on stderr are expected for non-repos and ignored.
pub fn is_git(path: &Path) -> Result<bool> {
    match Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(path)
        .output()
    {
        Ok(output) => Ok(!output.stdout.is_empty()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Returns true if `path` is inside an svn working copy.
///
/// Runs `svn info`; an empty stderr means svn recognized the directory.
pub fn is_svn(path: &Path) -> Result<bool> {
    match Command::new("svn").arg("info").current_dir(path).output() {
        Ok(output) => Ok(output.stderr.is_empty()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Runs an SCM command in `path` and returns its stdout.
///
/// Anything on stderr is treated as a fatal query failure: a broken checkout
/// should surface loudly rather than silently fall back to a made-up version.
///
/// # Arguments
/// * `path` - Working directory for the command
/// * `program` - Binary to invoke (e.g. "git")
/// * `args` - Arguments to pass
///
/// # Returns
/// * `Ok(String)` - Full stdout of the command
/// * `Err` - If the process could not run or wrote to stderr
pub(crate) fn run_scm(path: &Path, program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .current_dir(path)
        .output()?;
    if !output.stderr.is_empty() {
        return Err(ScmVersionError::scm_query(format!(
            "`{} {}` reported: {}",
            program,
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_plain_directory_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(probe(dir.path()).unwrap(), ScmKind::None);
    }

    #[test]
    fn test_run_scm_returns_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = run_scm(dir.path(), "git", &["--version"]).unwrap();
        assert!(out.starts_with("git version"));
    }

    #[test]
    fn test_run_scm_stderr_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_scm(dir.path(), "git", &["log"]).unwrap_err();
        assert!(err.to_string().contains("SCM query failed"));
    }
}
