//! Insertion-ordered, deduplicating accumulator for dataset items.

use std::collections::HashSet;

use crate::record::DatasetItem;

/// Accumulates normalized items in arrival order, dropping duplicates by
/// identifier. First write wins: the remote source may return the same
/// record across overlapping pages.
///
/// Single-writer by design; wrap in a mutex before sharing across tasks.
#[derive(Debug, Default)]
pub struct DatasetSink {
    items: Vec<DatasetItem>,
    seen: HashSet<String>,
    duplicates: u64,
}

impl DatasetSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an item unless its identifier was already seen.
    ///
    /// Returns `true` when the item was newly inserted, `false` when it was
    /// dropped as a duplicate.
    pub fn append(&mut self, item: DatasetItem) -> bool {
        if self.seen.contains(&item.id) {
            self.duplicates += 1;
            tracing::trace!(id = %item.id, "dropping duplicate record");
            return false;
        }
        self.seen.insert(item.id.clone());
        self.items.push(item);
        true
    }

    /// Items in first-insertion order.
    #[must_use]
    pub fn items(&self) -> &[DatasetItem] {
        &self.items
    }

    /// Consumes the sink, yielding the items in first-insertion order.
    #[must_use]
    pub fn into_items(self) -> Vec<DatasetItem> {
        self.items
    }

    /// Number of distinct items accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sink holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of duplicate appends dropped over the sink's lifetime.
    #[must_use]
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }
}
