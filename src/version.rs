use std::fmt;

use regex::Regex;

/// Pattern for a string ending in a maximal run of digits.
const TRAILING_DIGITS_PATTERN: &str = r"^(.*?)([0-9]+)$";

/// Increments the final maximal run of digits in a version string.
///
/// This is the single bump rule used everywhere: for computing the next
/// planned release from a tag, and as a general-purpose version bump helper.
/// A string with no trailing digit run is returned unchanged.
///
/// # Example
/// ```
/// use scm_version::version::next_version;
/// assert_eq!(next_version("v0.1.2"), "v0.1.3");
/// assert_eq!(next_version("karoocamv9"), "karoocamv10");
/// assert_eq!(next_version("1.2"), "1.3");
/// assert_eq!(next_version("release"), "release");
/// ```
pub fn next_version(version: &str) -> String {
    if let Ok(re) = Regex::new(TRAILING_DIGITS_PATTERN) {
        if let Some(captures) = re.captures(version) {
            if let Ok(number) = captures[2].parse::<u64>() {
                return format!("{}{}", &captures[1], number + 1);
            }
        }
    }
    version.to_string()
}

/// Splits a normalized version string into (major, minor, patch).
///
/// The string is split on `.` into at most three pieces. Sanitization then
/// guarantees integer major/minor regardless of how malformed the input was:
/// a first component that does not parse (after stripping a leading `v`/`V`)
/// shifts everything into the patch with major and minor both 0; a second
/// component that does not parse inserts minor 0 and shifts the remainder.
/// Unusual strings are silently reinterpreted rather than rejected, e.g.
/// `"foo.bar"` becomes `(0, 0, "foo.bar")`.
pub fn decompose(version: &str) -> (u32, u32, String) {
    let parts: Vec<String> = version.splitn(3, '.').map(str::to_string).collect();
    sane_version_parts(parts)
}

fn sane_version_parts(parts: Vec<String>) -> (u32, u32, String) {
    let mut queue = parts;

    // Tags commonly carry a v before the major.
    let major = match queue
        .first()
        .and_then(|part| part.trim_start_matches(['v', 'V']).parse::<u32>().ok())
    {
        Some(value) => {
            queue.remove(0);
            value
        }
        None => 0,
    };

    let minor = match queue.first().and_then(|part| part.parse::<u32>().ok()) {
        Some(value) => {
            queue.remove(0);
            value
        }
        None => 0,
    };

    (major, minor, queue.join("."))
}

/// Decomposed version of a named package.
///
/// Patch is a string because it may hold arbitrary PEP 440 pre/dev/local
/// segments, not a single integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub name: String,
    pub major: u32,
    pub minor: u32,
    pub patch: String,
}

impl BuildInfo {
    /// Decomposes `version` into build info for the package `name`.
    pub fn new(name: impl Into<String>, version: &str) -> Self {
        let (major, minor, patch) = decompose(version);
        BuildInfo {
            name: name.into(),
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.name, self.major, self.minor, self.patch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_version_dotted() {
        assert_eq!(next_version("v0.1.2"), "v0.1.3");
        assert_eq!(next_version("1.2"), "1.3");
        assert_eq!(next_version("0.0"), "0.1");
    }

    #[test]
    fn test_next_version_increments_whole_digit_run() {
        assert_eq!(next_version("karoocamv9"), "karoocamv10");
        assert_eq!(next_version("build19"), "build20");
    }

    #[test]
    fn test_next_version_without_trailing_digits_unchanged() {
        assert_eq!(next_version("release"), "release");
        assert_eq!(next_version("1.2rc"), "1.2rc");
        assert_eq!(next_version(""), "");
    }

    #[test]
    fn test_decompose_tagged_release() {
        assert_eq!(decompose("v1.2.3"), (1, 2, "3".to_string()));
        assert_eq!(decompose("1.2"), (1, 2, String::new()));
    }

    #[test]
    fn test_decompose_dev_version() {
        assert_eq!(
            decompose("99.88.dev1234+345.678"),
            (99, 88, "dev1234+345.678".to_string())
        );
    }

    #[test]
    fn test_decompose_malformed_shifts_into_patch() {
        assert_eq!(decompose("foo.bar"), (0, 0, "foo.bar".to_string()));
        assert_eq!(decompose("1.foo.bar"), (1, 0, "foo.bar".to_string()));
    }

    #[test]
    fn test_build_info_display() {
        let info = BuildInfo::new("mypkg", "1.2.dev3+main.abc1234");
        assert_eq!(info.major, 1);
        assert_eq!(info.minor, 2);
        assert_eq!(info.patch, "dev3+main.abc1234");
        assert_eq!(info.to_string(), "mypkg 1 2 dev3+main.abc1234");
    }
}
