//! Git version extraction.
//!
//! Walks the decorated commit log of a checkout to find the nearest version
//! tag and builds a raw (unnormalized) version string from it. Release builds
//! get the plain tag numbers; anything else gets a `.devN` build toward the
//! next release, qualified with branch, short hash and dirty state.

use std::path::Path;

use regex::Regex;

use crate::error::Result;
use crate::scm::run_scm;
use crate::version::next_version;

/// What a tag must look like, after stripping a leading `v`/`V` and
/// lower-casing, to count as a version tag.
const VERSION_TAG_PATTERN: &str = r"^[0-9]+(\.[0-9]+)*$";

/// Placeholder for fields that have no value in a repository without commits.
const UNKNOWN: &str = "unknown";

/// Snapshot of the checkout state needed to derive a version.
///
/// Built once per extraction from raw git command output, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDescriptor {
    /// Abbreviated hash of the current commit
    pub short_hash: String,
    /// Current symbolic branch name, lower-cased (`head` when detached)
    pub branch_name: String,
    /// True if any tracked file is modified; untracked files are ignored
    pub is_dirty: bool,
    /// Full history length from the current commit back to the root
    pub commits_since_branch_root: usize,
    /// Dotted integers of the nearest version tag, empty if none found
    pub tagged_version_numbers: Vec<u64>,
    /// True iff the version tag sits on the current commit and the tree is clean
    pub is_exact_tag_match: bool,
}

impl CommitDescriptor {
    fn empty_history() -> Self {
        CommitDescriptor {
            short_hash: UNKNOWN.to_string(),
            branch_name: UNKNOWN.to_string(),
            is_dirty: false,
            commits_since_branch_root: 0,
            tagged_version_numbers: Vec::new(),
            is_exact_tag_match: false,
        }
    }
}

/// Gets the raw git version string for a checkout.
///
/// # Arguments
/// * `path` - Directory known to be a git checkout
///
/// # Returns
/// * `Ok(String)` - Raw version string, still to be normalized
/// * `Err` - If any git command reports an error
pub fn git_version(path: &Path) -> Result<String> {
    let descriptor = describe(path)?;
    Ok(version_from_descriptor(&descriptor))
}

/// Builds a [CommitDescriptor] from the live repository state.
pub fn describe(path: &Path) -> Result<CommitDescriptor> {
    // An unborn branch makes `git log` fail loudly; with --quiet this probe
    // stays silent and just returns nothing.
    let head = run_scm(path, "git", &["rev-parse", "--verify", "--quiet", "HEAD"])?;
    if head.trim().is_empty() {
        return Ok(CommitDescriptor::empty_history());
    }

    let log = run_scm(path, "git", &["log", "--format=%h%d"])?;
    let lines: Vec<&str> = log.lines().filter(|line| !line.trim().is_empty()).collect();

    let commits_since_branch_root = lines.len();
    let short_hash = lines
        .first()
        .map(|line| parse_decoration_line(line).0.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let branch = run_scm(path, "git", &["rev-parse", "--abbrev-ref", "HEAD"])?;
    let branch_name = branch.trim().to_lowercase();

    let status = run_scm(path, "git", &["status", "--porcelain"])?;
    let is_dirty = status
        .lines()
        .any(|line| !line.trim().is_empty() && !line.starts_with("??"));

    // Newest to oldest; the first commit carrying a qualifying tag wins.
    let mut tagged_version_numbers = Vec::new();
    let mut tagged_at = None;
    'walk: for (index, line) in lines.iter().enumerate() {
        let (_, tags) = parse_decoration_line(line);
        for tag in tags {
            if let Some(numbers) = version_tag_numbers(tag) {
                tagged_version_numbers = numbers;
                tagged_at = Some(index);
                break 'walk;
            }
        }
    }

    let is_exact_tag_match = tagged_at == Some(0) && !is_dirty;

    Ok(CommitDescriptor {
        short_hash,
        branch_name,
        is_dirty,
        commits_since_branch_root,
        tagged_version_numbers,
        is_exact_tag_match,
    })
}

/// Turns a [CommitDescriptor] into a raw version string.
///
/// An exact tag match yields the dotted tag numbers as-is. Otherwise the last
/// tag number is incremented to the next planned release and the result is
/// a development version carrying the commit count, branch, hash and dirty
/// marker in its local segment.
pub fn version_from_descriptor(descriptor: &CommitDescriptor) -> String {
    let release = if descriptor.tagged_version_numbers.is_empty() {
        "0.0".to_string()
    } else {
        descriptor
            .tagged_version_numbers
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".")
    };

    if descriptor.is_exact_tag_match {
        return release;
    }

    let dirty_suffix = if descriptor.is_dirty { ".dirty" } else { "" };
    format!(
        "{}.dev{}+{}.{}{}",
        next_version(&release),
        descriptor.commits_since_branch_root,
        descriptor.branch_name,
        descriptor.short_hash,
        dirty_suffix
    )
}

/// Splits one `git log --format=%h%d` line into the hash and any tag names.
///
/// The decoration part looks like ` (HEAD -> main, tag: v1.0, origin/main)`
/// and is absent for undecorated commits. Only `tag: ` entries are returned.
fn parse_decoration_line(line: &str) -> (&str, Vec<&str>) {
    match line.split_once(' ') {
        Some((hash, decorations)) => {
            let inner = decorations
                .trim()
                .strip_prefix('(')
                .and_then(|d| d.strip_suffix(')'))
                .unwrap_or("");
            let tags = inner
                .split(", ")
                .filter_map(|entry| entry.strip_prefix("tag: "))
                .collect();
            (hash, tags)
        }
        None => (line, Vec::new()),
    }
}

/// Parses a tag name into its dotted version numbers, if it qualifies.
///
/// A tag qualifies when, after stripping an optional leading `v`/`V` and
/// lower-casing, it is a dotted sequence of non-negative integers
/// (e.g. "v1.12", "2"). Anything else is ignored, not an error.
fn version_tag_numbers(tag: &str) -> Option<Vec<u64>> {
    let stripped = tag
        .strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag);
    let lowered = stripped.to_lowercase();
    if let Ok(re) = Regex::new(VERSION_TAG_PATTERN) {
        if re.is_match(&lowered) {
            return lowered
                .split('.')
                .map(|part| part.parse::<u64>().ok())
                .collect();
        }
    }
    None
}
