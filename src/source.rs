//! Filesystem access used by the traversal

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use crate::types::DocumentInfo;

/// Iterator over a directory's entry names
pub type Entries<'a> = Box<dyn Iterator<Item = io::Result<OsString>> + 'a>;

/// Kind of a directory entry after following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Dir,
    /// Anything else (sockets, devices, fifos)
    Other,
}

/// Result of a metadata query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    /// What the entry is
    pub kind: EntryKind,
    /// Snapshot kept on records when details are requested
    pub info: DocumentInfo,
}

/// Something a search can walk
///
/// The outer error of [`Source::entries`] means the directory could not be
/// opened; an error yielded by the iterator means iteration itself failed.
pub trait Source {
    /// List the entry names of `dir`
    ///
    /// # Errors
    /// Returns error if the directory cannot be opened.
    fn entries(&self, dir: &Path) -> io::Result<Entries<'_>>;

    /// Query metadata for `path`, following symlinks
    ///
    /// # Errors
    /// Returns error if the metadata cannot be read.
    fn metadata(&self, path: &Path) -> io::Result<EntryMeta>;
}

impl<S: Source + ?Sized> Source for &S {
    fn entries(&self, dir: &Path) -> io::Result<Entries<'_>> {
        (**self).entries(dir)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMeta> {
        (**self).metadata(path)
    }
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSource;

impl Source for OsSource {
    fn entries(&self, dir: &Path) -> io::Result<Entries<'_>> {
        let read_dir = fs::read_dir(dir)?;
        Ok(Box::new(read_dir.map(|entry| entry.map(|e| e.file_name()))))
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMeta> {
        let meta = fs::metadata(path)?;
        let kind = if meta.is_dir() {
            EntryKind::Dir
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        let info =
            DocumentInfo { mode: mode_of(&meta), size: meta.len(), modified: meta.modified().ok() };
        Ok(EntryMeta { kind, info })
    }
}

#[cfg(unix)]
fn mode_of(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode()
}

#[cfg(not(unix))]
fn mode_of(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() { 0o444 } else { 0o644 }
}
