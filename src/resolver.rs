//! Version source resolution.
//!
//! Five sources are tried in a fixed, total order; the first one that yields
//! a version string wins. There is no looping or re-entry: each state either
//! terminates resolution or falls through to the next.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScmVersionError};
use crate::metadata::{self, DistMetadata, PythonEnv};
use crate::normalize::normalize;
use crate::scm::{self, fallback, git, ScmKind};
use crate::version::BuildInfo;

/// Name of the sentinel file holding a cached raw version string.
///
/// Written by an external packaging step (e.g. into an exported archive);
/// this crate only ever reads it.
pub const VERSION_FILE: &str = "___version___";

/// Inputs to version resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Installed package to query before touching the filesystem
    pub module_name: Option<String>,
    /// Checkout path; the current directory when absent
    pub override_path: Option<PathBuf>,
}

/// Resolves a version string by precedence across the available sources:
/// installed-module metadata, unpacked-sdist metadata, live SCM query,
/// sentinel version file, date-based fallback.
pub struct Resolver {
    options: ResolveOptions,
    metadata: Box<dyn DistMetadata>,
}

impl Resolver {
    /// Creates a resolver backed by the ambient Python environment.
    pub fn new(options: ResolveOptions) -> Self {
        Resolver {
            options,
            metadata: Box::new(PythonEnv),
        }
    }

    /// Creates a resolver with an injected metadata lookup.
    pub fn with_metadata(options: ResolveOptions, metadata: Box<dyn DistMetadata>) -> Self {
        Resolver { options, metadata }
    }

    /// Resolves the version string.
    ///
    /// An installed package reports its installed version even when run from
    /// a checkout, so module metadata is consulted before any SCM work.
    ///
    /// # Returns
    /// * `Ok(String)` - Normalized version string (the final fallback always
    ///   succeeds, so a usable path always yields a version)
    /// * `Err` - On an unusable checkout path or a failing SCM query
    pub fn resolve(&self) -> Result<String> {
        if let Some(module) = &self.options.module_name {
            if let Some(version) = self.metadata.installed_version(module) {
                return Ok(normalize(&version));
            }
        }

        let path = self.target_dir()?;

        if let Some(version) = metadata::sdist_version(&path) {
            return Ok(normalize(&version));
        }

        match scm::probe(&path)? {
            ScmKind::Git => return Ok(normalize(&git::git_version(&path)?)),
            ScmKind::Svn => return Ok(fallback::date_version(Some("svn"))),
            ScmKind::None => {}
        }

        if let Some(version) = version_from_file(&path) {
            return Ok(version);
        }

        Ok(fallback::date_version(None))
    }

    /// Resolves the decomposed version for the package `name`.
    pub fn resolve_build_info(&self, name: &str) -> Result<BuildInfo> {
        let version = self.resolve()?;
        Ok(BuildInfo::new(name, &version))
    }

    /// Normalizes the target path to an absolute directory.
    ///
    /// A file path maps to its containing directory. A path that does not
    /// exist or is not usable as a directory is a configuration error, not
    /// something to silently default away.
    fn target_dir(&self) -> Result<PathBuf> {
        let path = match &self.options.override_path {
            Some(path) => fs::canonicalize(path).map_err(|_| {
                ScmVersionError::config(format!(
                    "checkout path '{}' does not exist",
                    path.display()
                ))
            })?,
            None => env::current_dir()?,
        };

        let path = if path.is_file() {
            path.parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| {
                    ScmVersionError::config(format!(
                        "checkout path '{}' has no parent directory",
                        path.display()
                    ))
                })?
        } else {
            path
        };

        if !path.is_dir() {
            return Err(ScmVersionError::config(format!(
                "checkout path '{}' is not a usable directory",
                path.display()
            )));
        }
        Ok(path)
    }
}

/// Reads the sentinel version file, looking in `path` and then its parent.
///
/// The first existing candidate is read; an empty or unreadable file counts
/// as absent and resolution falls through.
fn version_from_file(path: &Path) -> Option<String> {
    let candidates = [
        Some(path.join(VERSION_FILE)),
        path.parent().map(|parent| parent.join(VERSION_FILE)),
    ];
    let filename = candidates
        .into_iter()
        .flatten()
        .find(|candidate| candidate.is_file())?;

    let contents = fs::read_to_string(&filename).ok()?;
    let first_line = contents.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        None
    } else {
        Some(normalize(first_line))
    }
}

/// Resolves the version string for the given options.
///
/// This is the primary library entry point consumed by build-tool glue.
pub fn resolve_version(options: &ResolveOptions) -> Result<String> {
    Resolver::new(options.clone()).resolve()
}

/// Resolves the decomposed `(name, major, minor, patch)` form.
pub fn resolve_decomposed_version(name: &str, options: &ResolveOptions) -> Result<BuildInfo> {
    Resolver::new(options.clone()).resolve_build_info(name)
}
