//! PEP 440 canonicalization of raw version strings.

use std::str::FromStr;

use pep440_rs::Version as Pep440Version;

/// Normalizes a raw version string into PEP 440 canonical form.
///
/// The public portion (before any `+`) is delegated to the `pep440_rs` parser
/// so pre-release markers and epoch numbers match ecosystem conventions
/// exactly; when the string does not parse, a hand-rolled rule (lower-case,
/// strip a leading `v` before a digit) is applied instead. The local portion
/// (after `+`) is lower-cased with every non-alphanumeric run collapsed into
/// a single `.`.
///
/// Normalization is idempotent: normalizing an already-normalized string
/// returns it unchanged.
pub fn normalize(raw: &str) -> String {
    let raw = raw.trim();
    let (public, local) = match raw.split_once('+') {
        Some((public, local)) => (public, Some(local)),
        None => (raw, None),
    };
    let local = local
        .map(normalize_local)
        .filter(|cleaned| !cleaned.is_empty());

    let candidate = join(public, local.as_deref());
    match Pep440Version::from_str(&candidate) {
        Ok(version) => version.to_string(),
        Err(_) => join(&normalize_public(public), local.as_deref()),
    }
}

fn join(public: &str, local: Option<&str>) -> String {
    match local {
        Some(local) => format!("{}+{}", public, local),
        None => public.to_string(),
    }
}

/// Fallback rule for the public portion when PEP 440 parsing is impossible.
fn normalize_public(public: &str) -> String {
    let lowered = public.to_lowercase();
    match lowered.strip_prefix('v') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest.to_string(),
        _ => lowered,
    }
}

/// Lower-cases a local segment and collapses separator runs into `.`.
fn normalize_local(local: &str) -> String {
    let mut cleaned = String::with_capacity(local.len());
    for c in local.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            cleaned.push(c);
        } else if !cleaned.ends_with('.') {
            cleaned.push('.');
        }
    }
    cleaned.trim_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tag_prefix() {
        assert_eq!(normalize("v1.2"), "1.2");
        assert_eq!(normalize("V1.2"), "1.2");
    }

    #[test]
    fn test_release_version_unchanged() {
        assert_eq!(normalize("1.2"), "1.2");
        assert_eq!(normalize("0.1"), "0.1");
    }

    #[test]
    fn test_dev_version_is_fixed_point() {
        assert_eq!(normalize("0.1.dev1+main.abc1234"), "0.1.dev1+main.abc1234");
        assert_eq!(
            normalize("1.1.dev34+new.shiny.feature.fa973da"),
            "1.1.dev34+new.shiny.feature.fa973da"
        );
    }

    #[test]
    fn test_local_segment_cleanup() {
        assert_eq!(normalize("1.0+Feature/New_Thing"), "1.0+feature.new.thing");
        assert_eq!(normalize("1.0+main.abc1234.dirty"), "1.0+main.abc1234.dirty");
    }

    #[test]
    fn test_local_separator_runs_collapse() {
        assert_eq!(normalize("1.0+a--_b"), "1.0+a.b");
        assert_eq!(normalize("1.0+.a."), "1.0+a");
    }

    #[test]
    fn test_degenerate_local_is_dropped() {
        assert_eq!(normalize("1.0+..."), "1.0");
    }

    #[test]
    fn test_malformed_public_uses_fallback_rule() {
        assert_eq!(normalize("Not.A.Version"), "not.a.version");
        assert_eq!(normalize("vFoo"), "vfoo");
    }

    #[test]
    fn test_idempotence() {
        let samples = [
            "v1.2",
            "1.2",
            "0.1.dev1+main.abc1234",
            "0.0+unknown.svn.201402031023",
            "1.3.dev7+master.b91ffa6.dirty",
            "Not.A.Version",
            "1.0+Feature/New_Thing",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {}", sample);
        }
    }

    // The delegated and hand-rolled paths must agree on everything this
    // crate generates itself.
    #[test]
    fn test_fallback_rule_agrees_with_parser_on_generated_strings() {
        let generated = ["1.2", "0.1", "2", "v1.12", "1.2.3"];
        for sample in generated {
            assert_eq!(normalize(sample), normalize_public(sample));
        }
    }
}
