//! Semantic-version satisfaction.

use semver::{Version, VersionReq};

/// Whether an actual version satisfies a declared range.
///
/// Local-link declarations never reach this test; callers short-circuit them
/// as always satisfied before consulting the range.
pub fn is_compatible(actual: &Version, expected: &VersionReq) -> bool {
    expected.matches(actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn range(s: &str) -> VersionReq {
        VersionReq::parse(s).unwrap()
    }

    #[test]
    fn test_caret_range() {
        assert!(is_compatible(&version("1.2.0"), &range("^1.0.0")));
        assert!(!is_compatible(&version("2.0.0"), &range("^1.0.0")));
    }

    #[test]
    fn test_tilde_range() {
        assert!(is_compatible(&version("1.2.3"), &range("~1.2.0")));
        assert!(!is_compatible(&version("1.3.0"), &range("~1.2.0")));
    }

    #[test]
    fn test_exact_version() {
        assert!(is_compatible(&version("1.2.3"), &range("=1.2.3")));
        assert!(!is_compatible(&version("1.2.4"), &range("=1.2.3")));
    }

    #[test]
    fn test_wildcard_matches_anything_released() {
        assert!(is_compatible(&version("0.0.1"), &range("*")));
        assert!(is_compatible(&version("42.0.0"), &range("*")));
    }

    #[test]
    fn test_comparator_range() {
        assert!(is_compatible(&version("1.5.0"), &range(">=1.0.0, <2.0.0")));
        assert!(!is_compatible(&version("2.1.0"), &range(">=1.0.0, <2.0.0")));
    }
}
