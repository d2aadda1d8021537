//! Parsed search results and the append-only store that owns them.

use crate::model::error::SourceError;

/// One parsed producer line: `name : line_number : content`.
///
/// Immutable once created. Fields are owned strings of arbitrary length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    source_name: String,
    source_line_number: String,
    content: String,
}

impl Record {
    /// Create a record from its three fields.
    pub fn new(
        source_name: impl Into<String>,
        source_line_number: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            source_line_number: source_line_number.into(),
            content: content.into(),
        }
    }

    /// Path of the file the match came from.
    pub fn name(&self) -> &str {
        &self.source_name
    }

    /// Line number as emitted by the producer (kept verbatim).
    pub fn line_number(&self) -> &str {
        &self.source_line_number
    }

    /// Matched line text, leading whitespace already trimmed.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Ordered, append-only sequence of records.
///
/// Insertion order is producer emission order. Indices are stable for the
/// lifetime of the store; a new search builds a new store.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    ///
    /// Growth is amortized doubling. If the allocator refuses to grow the
    /// backing array the store is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::AllocationFailed` when growth fails.
    pub fn push(&mut self, record: Record) -> Result<(), SourceError> {
        self.records
            .try_reserve(1)
            .map_err(|_| SourceError::AllocationFailed)?;
        self.records.push(record);
        Ok(())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no record has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}
