//! Document search engine

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::crawler::Crawler;
use crate::error::Result;
use crate::results::ResultList;
use crate::source::{OsSource, Source};
use crate::types::{MAX_DEPTH, SearchPattern};

/// Finds documents by filename under one or more root directories
///
/// # Guarantees
/// - A call either returns every match or an error, never a partial list
/// - Results of several roots are concatenated in root order
/// - No state is shared between calls
#[derive(Debug, Clone)]
pub struct SearchEngine<S = OsSource> {
    /// Filesystem being searched
    source:    S,
    /// Deepest directory level searched below a root
    max_depth: usize,
    /// Whether records carry a metadata snapshot
    details:   bool,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// Create an engine over the real filesystem
    #[must_use = "SearchEngine must be used to search for documents"]
    pub const fn new() -> Self {
        Self::with_source(OsSource)
    }
}

impl<S: Source> SearchEngine<S> {
    /// Create an engine over an arbitrary [`Source`]
    pub const fn with_source(source: S) -> Self {
        Self { source, max_depth: MAX_DEPTH, details: false }
    }

    /// Limit how deep below a root the search descends
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Keep each document's metadata on its record
    #[must_use]
    pub fn capture_details(mut self, yes: bool) -> Self {
        self.details = yes;
        self
    }

    fn crawler(&self) -> Crawler<'_, S> {
        Crawler::new(&self.source, self.max_depth, self.details)
    }

    /// Search a single root directory
    ///
    /// # Errors
    /// Returns a traversal error if any directory cannot be opened or read,
    /// an entry cannot be stat'ed, or the depth limit is exceeded.
    pub fn search(&self, root: &Path, pattern: &SearchPattern) -> Result<ResultList> {
        debug!(root = %root.display(), needle = ?pattern.needle(), "searching");
        self.crawler().collect(root, pattern).inspect_err(|e| warn!("search aborted: {e}"))
    }

    /// Search every root in order and concatenate the results
    ///
    /// The first failing root aborts the whole call and everything collected
    /// so far is dropped.
    ///
    /// # Errors
    /// Same conditions as [`SearchEngine::search`], for any root.
    pub fn search_all<P: AsRef<Path>>(
        &self,
        roots: &[P],
        pattern: &SearchPattern,
    ) -> Result<ResultList> {
        let mut found = ResultList::new();
        for root in roots {
            found.extend(self.search(root.as_ref(), pattern)?)?;
        }
        debug!(count = found.count(), roots = roots.len(), "search finished");
        Ok(found)
    }

    /// Resolve the full path of a document known only by name
    ///
    /// Returns the first regular file whose full path contains `exact_name`,
    /// searching roots in order. Records from [`SearchEngine::search`] already
    /// carry their path; this is for callers holding a bare name.
    ///
    /// # Errors
    /// Same conditions as [`SearchEngine::search`].
    pub fn resolve_one<P: AsRef<Path>>(
        &self,
        roots: &[P],
        exact_name: &str,
        recursive: bool,
    ) -> Result<Option<PathBuf>> {
        let crawler = self.crawler();
        for root in roots {
            if let Some(path) = crawler.find_first(root.as_ref(), exact_name, recursive)? {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }
}
