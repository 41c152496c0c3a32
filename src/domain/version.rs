//! Loose version ordering for versioned package ignores.
//!
//! Deprecation `since` versions are free-form dotted strings ("2.8",
//! "0.0.1", "3.0.0-beta1"). Strict semver parsing would reject many of them,
//! so ordering is computed segment by segment: numeric segments compare
//! numerically, everything else lexically, and missing segments count as
//! zero / empty.

use std::cmp::Ordering;

/// One dot- or dash-delimited version segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Number(u64),
    Text(String),
}

fn segments(version: &str) -> Vec<Segment> {
    version
        .split(['.', '-', '+'])
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u64>() {
            Ok(n) => Segment::Number(n),
            Err(_) => Segment::Text(s.to_ascii_lowercase()),
        })
        .collect()
}

/// Compare two loose version strings.
///
/// # Example
/// ```
/// use std::cmp::Ordering;
/// use deprecations::domain::version::compare;
///
/// assert_eq!(compare("2.8", "2.10"), Ordering::Less);
/// assert_eq!(compare("3.0.0", "3.0"), Ordering::Equal);
/// assert_eq!(compare("1.2.1", "1.2"), Ordering::Greater);
/// ```
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let zero = Segment::Number(0);
        let l = left.get(i).unwrap_or(&zero);
        let r = right.get(i).unwrap_or(&zero);

        let ord = match (l, r) {
            (Segment::Number(l), Segment::Number(r)) => l.cmp(r),
            (Segment::Text(l), Segment::Text(r)) => l.cmp(r),
            // A numeric segment outranks a textual one at the same position
            // ("1.0" > "1.beta").
            (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}

/// True if `version` is at least `threshold` under the loose ordering.
pub fn at_least(version: &str, threshold: &str) -> bool {
    compare(version, threshold) != Ordering::Less
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ordering() {
        assert_eq!(compare("1.2.3", "1.2.4"), Ordering::Less);
        assert_eq!(compare("2.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare("1.2.3", "1.2.3"), Ordering::Equal);
    }

    #[test]
    fn test_numeric_not_lexical() {
        assert_eq!(compare("2.8", "2.10"), Ordering::Less);
    }

    #[test]
    fn test_missing_segments_are_zero() {
        assert_eq!(compare("3.0", "3.0.0"), Ordering::Equal);
        assert_eq!(compare("3.0.1", "3.0"), Ordering::Greater);
    }

    #[test]
    fn test_prerelease_segments() {
        assert_eq!(compare("3.0.0-beta1", "3.0.0"), Ordering::Less);
        assert_eq!(compare("3.0.0-alpha", "3.0.0-beta"), Ordering::Less);
    }

    #[test]
    fn test_at_least() {
        assert!(at_least("2.9", "2.8"));
        assert!(at_least("2.8", "2.8"));
        assert!(!at_least("2.7.9", "2.8"));
    }
}
