//! Filename matching and ordering primitives

use std::cmp::Ordering;

/// Case-sensitive substring test
///
/// An empty needle matches every haystack.
#[must_use]
pub fn contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.contains(needle)
}

/// Case-insensitive substring test
///
/// Both sides are lower-cased into fresh buffers; the inputs are never touched.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Order two names the way document listings are sorted
///
/// Characters are compared pairwise over the common prefix:
/// - two ASCII letters compare case-insensitively
/// - a letter orders before a non-letter
/// - two non-letters compare by code point
///
/// If the common prefix ties, the shorter name comes first.
#[must_use]
pub fn compare_alphabetically(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        let order = match (x.is_ascii_alphabetic(), y.is_ascii_alphabetic()) {
            (true, true) => x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase()),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => x.cmp(&y),
        };
        if order != Ordering::Equal {
            return order;
        }
    }
    // Equal prefixes hold the same characters up to ASCII case, so byte
    // length orders the same way character count would.
    a.len().cmp(&b.len())
}

/// Whether `a` sorts strictly before `b`
#[must_use]
pub fn alphabetically_precedes(a: &str, b: &str) -> bool {
    compare_alphabetically(a, b) == Ordering::Less
}

/// Split a free-form argument string into tokens
///
/// Runs of whitespace collapse, so no token is ever empty.
pub fn split_args(args: &str) -> impl Iterator<Item = &str> {
    args.split_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_case_sensitive() {
        assert!(contains("report.pdf", "port"));
        assert!(!contains("Report.pdf", "report"));
        assert!(contains("anything", ""));
        assert!(!contains("", "x"));
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Report_old.PDF", "report"));
        assert!(contains_ignore_case("report.pdf", "REPORT"));
        assert!(!contains_ignore_case("notes.pdf", "report"));
        assert!(contains_ignore_case("notes.pdf", ""));
    }

    #[test]
    fn test_contains_ignore_case_leaves_inputs() {
        let haystack = String::from("MiXeD.pdf");
        let needle = String::from("MIXED");
        assert!(contains_ignore_case(&haystack, &needle));
        assert_eq!(haystack, "MiXeD.pdf");
        assert_eq!(needle, "MIXED");
    }

    #[test]
    fn test_digits_and_case() {
        assert!(alphabetically_precedes("file1.pdf", "File2.pdf"));
        assert!(!alphabetically_precedes("File2.pdf", "file1.pdf"));
    }

    #[test]
    fn test_prefix_rule() {
        assert!(alphabetically_precedes("a", "ab"));
        assert!(!alphabetically_precedes("ab", "a"));
    }

    #[test]
    fn test_letters_before_non_letters() {
        assert!(alphabetically_precedes("ab", "a1"));
        assert!(alphabetically_precedes("a_b", "1ab"));
        assert!(!alphabetically_precedes("_x", "x"));
    }

    #[test]
    fn test_irreflexive() {
        for name in ["", "a", "Report.pdf", "1-2-3"] {
            assert!(!alphabetically_precedes(name, name));
        }
    }

    #[test]
    fn test_case_only_difference_is_equivalent() {
        assert_eq!(compare_alphabetically("ABC.pdf", "abc.pdf"), Ordering::Equal);
        assert!(!alphabetically_precedes("ABC.pdf", "abc.pdf"));
        assert!(!alphabetically_precedes("abc.pdf", "ABC.pdf"));
    }

    #[test]
    fn test_transitive_on_sample() {
        let names = ["alpha", "Alpha2", "beta", "b", "_tmp", "10.pdf", "9.pdf", "zeta"];
        for a in names {
            for b in names {
                for c in names {
                    if alphabetically_precedes(a, b) && alphabetically_precedes(b, c) {
                        assert!(alphabetically_precedes(a, c), "{a} < {b} < {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_split_args_collapses_whitespace() {
        let tokens: Vec<_> = split_args("  --flag1 \t --flag2\n-x  ").collect();
        assert_eq!(tokens, ["--flag1", "--flag2", "-x"]);
        assert_eq!(split_args("   ").count(), 0);
        assert_eq!(split_args("").count(), 0);
    }
}
