//! Common types and constants for `mdoc`

use std::path::PathBuf;
use std::time::SystemTime;

use crate::text;

/// Maximum directory depth allowed by default
pub const MAX_DEPTH: usize = 1_000;

/// Maximum length of a rendered error message
pub const MAX_ERROR_LENGTH: usize = 256;

/// Process exit code on success
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code on a command-line syntax error
pub const EXIT_USAGE: i32 = 1;

/// Process exit code on any other failure
pub const EXIT_FAILURE: i32 = 2;

const _: () = {
    assert!(MAX_DEPTH > 0);
    assert!(MAX_ERROR_LENGTH > 0);
};

/// Metadata snapshot captured for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentInfo {
    /// File mode bits (type and permissions)
    pub mode:     u32,
    /// Size in bytes
    pub size:     u64,
    /// Last modification time, when the platform reports one
    pub modified: Option<SystemTime>,
}

impl DocumentInfo {
    /// Permission bits only, without the file type
    #[must_use]
    pub const fn permissions(&self) -> u32 {
        self.mode & 0o7777
    }
}

/// One matched document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// Base filename, for display and matching
    ///
    /// Names that are not valid UTF-8 are converted lossily, so invalid
    /// sequences become U+FFFD. `path` always keeps the exact bytes.
    pub name: String,
    /// Full filesystem path
    pub path: PathBuf,
    /// Metadata, present only when the search captured details
    pub info: Option<DocumentInfo>,
}

impl DocumentRecord {
    /// Create a record without metadata
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), path: path.into(), info: None }
    }

    /// Attach a metadata snapshot
    #[must_use]
    pub fn with_info(mut self, info: Option<DocumentInfo>) -> Self {
        self.info = info;
        self
    }
}

/// Search criteria: a filename substring plus matching flags
///
/// A pattern without a needle (or with an empty one) matches every document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    needle:      Option<String>,
    ignore_case: bool,
    recursive:   bool,
}

impl Default for SearchPattern {
    fn default() -> Self {
        Self::all()
    }
}

impl SearchPattern {
    /// Pattern matching filenames that contain `needle`, recursive by default
    #[must_use]
    pub fn new(needle: impl Into<String>) -> Self {
        Self { needle: Some(needle.into()), ignore_case: false, recursive: true }
    }

    /// Pattern matching every document
    #[must_use]
    pub const fn all() -> Self {
        Self { needle: None, ignore_case: false, recursive: true }
    }

    /// Toggle case-insensitive matching
    #[must_use]
    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.ignore_case = yes;
        self
    }

    /// Toggle descending into subdirectories
    #[must_use]
    pub fn recursive(mut self, yes: bool) -> Self {
        self.recursive = yes;
        self
    }

    /// The substring to look for, if any
    #[must_use]
    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    /// Whether matching ignores case
    #[must_use]
    pub const fn is_ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Whether subdirectories are searched
    #[must_use]
    pub const fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Check a filename against this pattern
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self.needle.as_deref() {
            None => true,
            Some(needle) if self.ignore_case => text::contains_ignore_case(name, needle),
            Some(needle) => text::contains(name, needle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_defaults() {
        let pattern = SearchPattern::new("report");
        assert_eq!(pattern.needle(), Some("report"));
        assert!(pattern.is_recursive());
        assert!(!pattern.is_ignore_case());
    }

    #[test]
    fn test_pattern_all_matches_everything() {
        let pattern = SearchPattern::all();
        assert!(pattern.matches("anything.pdf"));
        assert!(pattern.matches(""));
        assert_eq!(SearchPattern::default(), pattern);
    }

    #[test]
    fn test_pattern_case_modes() {
        let sensitive = SearchPattern::new("report");
        assert!(sensitive.matches("report.pdf"));
        assert!(!sensitive.matches("Report_old.pdf"));

        let insensitive = SearchPattern::new("report").ignore_case(true);
        assert!(insensitive.matches("report.pdf"));
        assert!(insensitive.matches("Report_old.pdf"));
        assert!(!insensitive.matches("notes.pdf"));
    }

    #[test]
    fn test_empty_needle_matches() {
        assert!(SearchPattern::new("").matches("notes.pdf"));
    }

    #[test]
    fn test_permissions_strip_file_type() {
        let info = DocumentInfo { mode: 0o100_644, size: 3, modified: None };
        assert_eq!(info.permissions(), 0o644);
    }
}
