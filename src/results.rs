//! Ordered container of matched documents

use std::slice;
use std::vec;

use crate::error::{Error, Result};
use crate::text;
use crate::types::DocumentRecord;

/// Insertion-ordered list of matched documents
///
/// The list exclusively owns its records; dropping or releasing it frees them
/// all at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultList {
    records: Vec<DocumentRecord>,
}

impl ResultList {
    /// Create an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Append a record at the tail
    ///
    /// # Errors
    /// Returns `Error::Allocation` if the list cannot grow.
    pub fn append(&mut self, record: DocumentRecord) -> Result<()> {
        self.records.try_reserve(1).map_err(|_| Error::Allocation("result list"))?;
        self.records.push(record);
        Ok(())
    }

    /// Move every record of `other` to the tail, keeping its order
    ///
    /// # Errors
    /// Returns `Error::Allocation` if the list cannot grow.
    pub fn extend(&mut self, other: Self) -> Result<()> {
        if self.records.is_empty() {
            self.records = other.records;
            return Ok(());
        }
        self.records
            .try_reserve(other.records.len())
            .map_err(|_| Error::Allocation("result list"))?;
        self.records.extend(other.records);
        Ok(())
    }

    /// Number of records
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sort records by name using [`text::compare_alphabetically`]
    ///
    /// The sort is stable: names that compare equal keep their order.
    pub fn sort_by_name(&mut self) {
        self.records.sort_by(|a, b| text::compare_alphabetically(&a.name, &b.name));
    }

    /// Reverse the order of records
    pub fn reverse(&mut self) {
        self.records.reverse();
    }

    /// Free every record
    pub fn release(self) {
        drop(self);
    }

    /// First record, if any
    #[must_use]
    pub fn first(&self) -> Option<&DocumentRecord> {
        self.records.first()
    }

    /// Iterate records in list order
    pub fn iter(&self) -> slice::Iter<'_, DocumentRecord> {
        self.records.iter()
    }

    /// Names in list order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    /// Records as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[DocumentRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a ResultList {
    type IntoIter = slice::Iter<'a, DocumentRecord>;
    type Item = &'a DocumentRecord;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ResultList {
    type IntoIter = vec::IntoIter<DocumentRecord>;
    type Item = DocumentRecord;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<DocumentRecord> for ResultList {
    fn from_iter<I: IntoIterator<Item = DocumentRecord>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}
