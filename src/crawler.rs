//! Recursive directory traversal

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Error, Result, TraversalOp};
use crate::results::ResultList;
use crate::source::{EntryKind, EntryMeta, Source};
use crate::types::{DocumentRecord, SearchPattern};

/// Depth-first walker over a [`Source`]
///
/// Every failure unwinds immediately; whatever a level had collected is
/// dropped on the way out, so callers only ever see complete results.
#[derive(Debug)]
pub struct Crawler<'a, S: ?Sized> {
    /// Where entries come from
    source:    &'a S,
    /// Deepest level allowed below a root
    max_depth: usize,
    /// Whether records keep their metadata snapshot
    details:   bool,
}

impl<'a, S: Source + ?Sized> Crawler<'a, S> {
    /// Create a crawler over `source`
    pub const fn new(source: &'a S, max_depth: usize, details: bool) -> Self {
        Self { source, max_depth, details }
    }

    /// Collect every regular file under `dir` whose name matches `pattern`
    ///
    /// Files directly in `dir` come first, then those found in its
    /// subdirectories, each group in directory-iteration order.
    ///
    /// # Errors
    /// Returns error if:
    /// - `dir` or a subdirectory cannot be opened or iterated
    /// - An entry's metadata cannot be read
    /// - Nesting goes deeper than `max_depth`
    pub fn collect(&self, dir: &Path, pattern: &SearchPattern) -> Result<ResultList> {
        self.collect_at(dir, pattern, 0)
    }

    fn collect_at(&self, dir: &Path, pattern: &SearchPattern, depth: usize) -> Result<ResultList> {
        trace!(dir = %dir.display(), depth, "scanning directory");

        let mut own = ResultList::new();
        let mut nested = ResultList::new();

        for name in self.list(dir, depth)? {
            let path = dir.join(&name);
            let meta = self.stat(&path)?;

            match meta.kind {
                EntryKind::Dir if pattern.is_recursive() => {
                    nested.extend(self.collect_at(&path, pattern, depth + 1)?)?;
                },
                EntryKind::File => {
                    let name = name.to_string_lossy();
                    if pattern.matches(&name) {
                        trace!(path = %path.display(), "matched");
                        let info = self.details.then_some(meta.info);
                        own.append(DocumentRecord::new(name, path).with_info(info))?;
                    }
                },
                _ => {},
            }
        }

        own.extend(nested)?;
        Ok(own)
    }

    /// Find the first regular file whose full path contains `name`
    ///
    /// Traversal stops as soon as a candidate is found.
    ///
    /// # Errors
    /// Same conditions as [`Crawler::collect`].
    pub fn find_first(&self, dir: &Path, name: &str, recursive: bool) -> Result<Option<PathBuf>> {
        self.find_first_at(dir, name, recursive, 0)
    }

    fn find_first_at(
        &self,
        dir: &Path,
        name: &str,
        recursive: bool,
        depth: usize,
    ) -> Result<Option<PathBuf>> {
        for entry in self.list(dir, depth)? {
            let path = dir.join(&entry);
            match self.stat(&path)?.kind {
                EntryKind::Dir if recursive => {
                    if let Some(found) = self.find_first_at(&path, name, recursive, depth + 1)? {
                        return Ok(Some(found));
                    }
                },
                EntryKind::File if path.to_string_lossy().contains(name) => {
                    debug!(path = %path.display(), "resolved document path");
                    return Ok(Some(path));
                },
                _ => {},
            }
        }
        Ok(None)
    }

    /// Drain a directory listing, skipping the self and parent entries
    ///
    /// The listing is closed before any entry is inspected, so only one
    /// directory handle is open at a time.
    fn list(&self, dir: &Path, depth: usize) -> Result<Vec<OsString>> {
        if depth > self.max_depth {
            return Err(Error::DepthExceeded { path: dir.to_path_buf(), limit: self.max_depth });
        }

        let entries =
            self.source.entries(dir).map_err(|e| Error::traversal(TraversalOp::Open, dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let name = entry.map_err(|e| Error::traversal(TraversalOp::Read, dir, e))?;
            if name == "." || name == ".." {
                continue;
            }
            names.try_reserve(1).map_err(|_| Error::Allocation("directory listing"))?;
            names.push(name);
        }
        Ok(names)
    }

    fn stat(&self, path: &Path) -> Result<EntryMeta> {
        self.source
            .metadata(path)
            .map_err(|e: io::Error| Error::traversal(TraversalOp::Stat, path, e))
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use tempfile::TempDir;

    use super::*;
    use crate::source::OsSource;
    use crate::types::MAX_DEPTH;

    fn crawler() -> Crawler<'static, OsSource> {
        Crawler::new(&OsSource, MAX_DEPTH, false)
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let found = crawler().collect(temp_dir.path(), &SearchPattern::all()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        match crawler().collect(&missing, &SearchPattern::all()) {
            Err(Error::Traversal { op: TraversalOp::Open, path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected Open traversal error, got {other:?}"),
        }
    }

    #[test]
    fn test_own_files_before_nested() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("a_sub");
        fs::create_dir(&sub).unwrap();
        File::create(sub.join("nested.pdf")).unwrap();
        File::create(temp_dir.path().join("top.pdf")).unwrap();

        let found = crawler().collect(temp_dir.path(), &SearchPattern::new(".pdf")).unwrap();
        let names: Vec<_> = found.names().collect();
        assert_eq!(names, ["top.pdf", "nested.pdf"]);
        assert_eq!(found.as_slice()[1].path, sub.join("nested.pdf"));
    }

    #[test]
    fn test_non_recursive_skips_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        File::create(sub.join("deep.pdf")).unwrap();
        File::create(temp_dir.path().join("shallow.pdf")).unwrap();

        let pattern = SearchPattern::all().recursive(false);
        let found = crawler().collect(temp_dir.path(), &pattern).unwrap();
        assert_eq!(found.names().collect::<Vec<_>>(), ["shallow.pdf"]);
    }

    #[test]
    fn test_directories_are_not_documents() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("report_dir")).unwrap();

        let found = crawler().collect(temp_dir.path(), &SearchPattern::new("report")).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_details_captured_only_on_request() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("doc.pdf"), b"12345678").unwrap();

        let plain = crawler().collect(temp_dir.path(), &SearchPattern::all()).unwrap();
        assert!(plain.first().unwrap().info.is_none());

        let detailed = Crawler::new(&OsSource, MAX_DEPTH, true)
            .collect(temp_dir.path(), &SearchPattern::all())
            .unwrap();
        assert_eq!(detailed.first().unwrap().info.unwrap().size, 8);
    }

    #[test]
    fn test_directory_depth() {
        let temp_dir = TempDir::new().unwrap();
        let mut dir = temp_dir.path().to_path_buf();
        for i in 0..3 {
            dir = dir.join(format!("dir_{i}"));
            fs::create_dir(&dir).unwrap();
        }
        File::create(dir.join("deep.pdf")).unwrap();

        let shallow = Crawler::new(&OsSource, 2, false);
        match shallow.collect(temp_dir.path(), &SearchPattern::all()) {
            Err(Error::DepthExceeded { limit: 2, .. }) => (),
            other => panic!("Expected DepthExceeded error, got {other:?}"),
        }

        let deep = Crawler::new(&OsSource, 3, false);
        let found = deep.collect(temp_dir.path(), &SearchPattern::all()).unwrap();
        assert_eq!(found.count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_stat_failure_discards_everything() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        File::create(temp_dir.path().join("a.pdf")).unwrap();
        File::create(sub.join("b.pdf")).unwrap();
        std::os::unix::fs::symlink(sub.join("gone"), sub.join("broken.pdf")).unwrap();

        match crawler().collect(temp_dir.path(), &SearchPattern::all()) {
            Err(Error::Traversal { op: TraversalOp::Stat, path, .. }) => {
                assert_eq!(path, sub.join("broken.pdf"));
            },
            other => panic!("Expected Stat traversal error, got {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_keeps_exact_path() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let raw = std::ffi::OsStr::from_bytes(b"caf\xe9.pdf");
        File::create(temp_dir.path().join(raw)).unwrap();

        let found = crawler().collect(temp_dir.path(), &SearchPattern::new("caf")).unwrap();
        let doc = found.first().unwrap();
        assert_eq!(doc.name, "caf\u{fffd}.pdf");
        assert_eq!(doc.path, temp_dir.path().join(raw));
        assert!(doc.path.exists());
    }

    #[test]
    fn test_find_first() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        File::create(sub.join("target.pdf")).unwrap();
        File::create(temp_dir.path().join("other.pdf")).unwrap();

        let found = crawler().find_first(temp_dir.path(), "target.pdf", true).unwrap();
        assert_eq!(found, Some(sub.join("target.pdf")));

        let not_recursive = crawler().find_first(temp_dir.path(), "target.pdf", false).unwrap();
        assert_eq!(not_recursive, None);
    }
}
