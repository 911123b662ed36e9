//! Low-confidence date-based version for checkouts without usable SCM data.

use chrono::Local;

use crate::normalize::normalize;

/// Generates a version string from the SCM kind and the local wall-clock time.
///
/// Format: `0.0+unknown.<scm>.<YYYYMMDDHHmm>`, dropping the `<scm>` segment
/// when no kind is given. Minute resolution keeps repeated builds within one
/// CI step identical; it is not monotonic across machines with clock skew.
///
/// # Arguments
/// * `scm_type` - SCM qualifier (e.g. "svn"), or None when no SCM was found
pub fn date_version(scm_type: Option<&str>) -> String {
    let stamp = Local::now().format("%Y%m%d%H%M");
    let raw = match scm_type {
        Some(scm) => format!("0.0+unknown.{}.{}", scm, stamp),
        None => format!("0.0+unknown.{}", stamp),
    };
    normalize(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_date_version_without_scm() {
        let re = Regex::new(r"^0\.0\+unknown\.[0-9]{12}$").unwrap();
        let version = date_version(None);
        assert!(re.is_match(&version), "unexpected format: {}", version);
    }

    #[test]
    fn test_date_version_with_scm() {
        let re = Regex::new(r"^0\.0\+unknown\.svn\.[0-9]{12}$").unwrap();
        let version = date_version(Some("svn"));
        assert!(re.is_match(&version), "unexpected format: {}", version);
    }

    #[test]
    fn test_date_version_is_normalized() {
        let version = date_version(Some("svn"));
        assert_eq!(version, normalize(&version));
    }
}
