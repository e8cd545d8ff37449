//! RangeCache - Sparse Index-Keyed Item Store
//!
//! The leaf building block of every data view: a sparse `index -> item` map
//! plus the last known total count. Gaps represent "not yet loaded".

use ahash::AHashMap;

/// Sparse store of loaded items for one fetch key
#[derive(Clone, Debug)]
pub struct RangeCache<T> {
    items: AHashMap<usize, T>,
    total_count: Option<usize>,
}

impl<T> RangeCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            items: AHashMap::new(),
            total_count: None,
        }
    }

    /// Get a cached item by index (returns None if not yet loaded)
    pub fn cached_row(&self, index: usize) -> Option<&T> {
        self.items.get(&index)
    }

    /// Last known total count, if any fetch has completed
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    /// Number of items currently cached
    pub fn loaded_len(&self) -> usize {
        self.items.len()
    }

    /// Highest cached index, if any
    pub fn max_loaded_index(&self) -> Option<usize> {
        self.items.keys().copied().max()
    }

    /// Check if every index in the range is cached
    pub fn is_range_loaded(&self, range: std::ops::Range<usize>) -> bool {
        range.into_iter().all(|i| self.items.contains_key(&i))
    }

    /// Merge a fetched page into the cache
    ///
    /// Writes `items[start_index + i]` for each received item, then adopts the
    /// latest total count. Indices outside the written range are untouched;
    /// last write wins per index. Entries at or beyond the new total are
    /// pruned so the cache never claims rows the backend no longer reports.
    pub fn merge(&mut self, start_index: usize, items: Vec<T>, total_count: usize) {
        for (offset, item) in items.into_iter().enumerate() {
            self.items.insert(start_index + offset, item);
        }

        if let Some(previous) = self.total_count {
            if previous != total_count {
                tracing::warn!(
                    previous,
                    current = total_count,
                    "Backend total count changed between fetches"
                );
            }
        }
        self.total_count = Some(total_count);
        self.items.retain(|&index, _| index < total_count);
    }

    /// Drop every entry and forget the total count
    pub fn invalidate(&mut self) {
        self.items.clear();
        self.total_count = None;
    }
}

impl<T> Default for RangeCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
