//! Package metadata lookups.
//!
//! Both lookups are opaque: they either yield a version string or nothing,
//! and never fail loudly. The [DistMetadata] trait is the seam that lets
//! tests substitute a fixed environment for the real one.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;

/// One-liner asking the Python runtime for an installed distribution version.
const INSTALLED_VERSION_QUERY: &str =
    "import sys, importlib.metadata; print(importlib.metadata.version(sys.argv[1]))";

/// Lookup of installed-package metadata.
///
/// Implementations must be `Send + Sync`. The contract is boolean-success:
/// a version string when the package is installed, `None` otherwise.
pub trait DistMetadata: Send + Sync {
    /// Version of an installed distribution, or None if it is not installed.
    ///
    /// A dotted module path (e.g. `"pkg.sub"`) queries the top-level
    /// distribution `"pkg"`, since callers commonly pass `__name__`-style
    /// values.
    fn installed_version(&self, package: &str) -> Option<String>;
}

/// Queries the ambient Python environment for installed distributions.
pub struct PythonEnv;

impl DistMetadata for PythonEnv {
    fn installed_version(&self, package: &str) -> Option<String> {
        let package = package.split('.').next().unwrap_or(package);
        let output = Command::new("python3")
            .arg("-c")
            .arg(INSTALLED_VERSION_QUERY)
            .arg(package)
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if version.is_empty() {
            None
        } else {
            Some(version)
        }
    }
}

/// Fixed name-to-version table standing in for an installed environment.
pub struct StaticMetadata {
    versions: HashMap<String, String>,
}

impl StaticMetadata {
    /// Create an empty metadata table
    pub fn new() -> Self {
        StaticMetadata {
            versions: HashMap::new(),
        }
    }

    /// Record a package as installed at the given version
    pub fn insert(&mut self, package: impl Into<String>, version: impl Into<String>) {
        self.versions.insert(package.into(), version.into());
    }
}

impl Default for StaticMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl DistMetadata for StaticMetadata {
    fn installed_version(&self, package: &str) -> Option<String> {
        let package = package.split('.').next().unwrap_or(package);
        self.versions.get(package).cloned()
    }
}

/// Reads the version from unpacked source-distribution metadata.
///
/// An unpacked sdist carries a `PKG-INFO` file at its root; its `Version:`
/// header is the distribution version. Anything short of that (no file, no
/// header, empty value) yields None.
pub fn sdist_version(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path.join("PKG-INFO")).ok()?;
    for line in contents.lines() {
        if let Some(version) = line.strip_prefix("Version:") {
            let version = version.trim();
            if !version.is_empty() {
                return Some(version.to_string());
            }
        }
    }
    None
}
