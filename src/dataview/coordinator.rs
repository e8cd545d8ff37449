//! FetchCoordinator - Guarded Range Fetching
//!
//! Serializes range fetches per key, merges completed pages into the key's
//! cache, and keeps the pagination cursors current. While a fetch for a key
//! is in flight, new requests for that key are not dispatched; the latest
//! superseded range is parked in a depth-1 pending slot and re-issued on
//! completion if the viewport still needs it.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};

use super::cursor::{FetchKey, PaginationCursor};
use super::range_cache::RangeCache;
use crate::source::generate_request_id;

/// A dispatched (or dispatchable) range fetch
#[derive(Clone, Debug)]
pub struct RangeRequest {
    /// Correlation id for logging and event matching
    pub request_id: Arc<str>,
    /// Pagination scope
    pub key: FetchKey,
    /// First item index requested
    pub start: usize,
    /// One past the last item index requested
    pub end: usize,
    /// Whether the result extends the loaded prefix or replaces the window
    pub append: bool,
    /// Search term active when the request was issued
    pub search: Option<String>,
    /// Coordinator epoch; completions from an older epoch are discarded
    pub epoch: u64,
}

/// A successfully fetched page
#[derive(Clone, Debug)]
pub struct RangeSlice<T> {
    /// The items, in index order starting at the requested start
    pub items: Vec<T>,
    /// Total count for the current search/filter parameters
    pub total_count: usize,
}

/// A range waiting for the in-flight request on its key to finish
#[derive(Clone, Copy, Debug)]
struct PendingRange {
    start: usize,
    end: usize,
    append: bool,
}

/// Per-key fetch state for one data view
pub struct FetchCoordinator<T> {
    caches: AHashMap<FetchKey, RangeCache<T>>,
    cursors: AHashMap<FetchKey, PaginationCursor>,
    pending: AHashMap<FetchKey, PendingRange>,
    loading_keys: AHashSet<FetchKey>,
    search: Option<String>,
    epoch: u64,
}

impl<T> FetchCoordinator<T> {
    /// Create an empty coordinator
    pub fn new() -> Self {
        Self {
            caches: AHashMap::new(),
            cursors: AHashMap::new(),
            pending: AHashMap::new(),
            loading_keys: AHashSet::new(),
            search: None,
            epoch: 0,
        }
    }

    // ==================== Requests ====================

    /// Ask for a range; returns the request to dispatch, or None while a
    /// fetch for this key is already in flight
    ///
    /// A dropped request is remembered (latest wins) and re-issued by
    /// `complete` when the in-flight fetch finishes and the range is still
    /// missing.
    pub fn begin(
        &mut self,
        key: FetchKey,
        start: usize,
        end: usize,
        append: bool,
    ) -> Option<RangeRequest> {
        if end <= start {
            return None;
        }

        let cursor = self.cursors.entry(key.clone()).or_default();
        if cursor.is_loading {
            self.pending
                .insert(key, PendingRange { start, end, append });
            return None;
        }

        cursor.is_loading = true;
        self.loading_keys.insert(key.clone());

        Some(RangeRequest {
            request_id: generate_request_id(),
            key,
            start,
            end,
            append,
            search: self.search.clone(),
            epoch: self.epoch,
        })
    }

    /// Apply a fetch outcome; returns a follow-up request when a pending
    /// range still needs to be issued
    ///
    /// On failure the cache and cursor keep their last good contents; the
    /// next viewport event naturally retries.
    pub fn complete(
        &mut self,
        request: &RangeRequest,
        result: Result<RangeSlice<T>, Arc<str>>,
    ) -> Option<RangeRequest> {
        if request.epoch != self.epoch {
            tracing::debug!(
                request_id = %request.request_id,
                key = %request.key,
                "Discarding completion from a previous epoch"
            );
            return None;
        }

        self.loading_keys.remove(&request.key);
        let cursor = self.cursors.entry(request.key.clone()).or_default();
        cursor.is_loading = false;

        match result {
            Ok(slice) => {
                let received = slice.items.len();
                cursor.loaded_count = if request.append {
                    cursor.loaded_count + received
                } else {
                    received
                };
                cursor.total_count = Some(slice.total_count);
                cursor.loaded_count = cursor.loaded_count.min(slice.total_count);

                self.caches
                    .entry(request.key.clone())
                    .or_default()
                    .merge(request.start, slice.items, slice.total_count);

                tracing::debug!(
                    request_id = %request.request_id,
                    key = %request.key,
                    start = request.start,
                    received,
                    total = slice.total_count,
                    "Range fetch merged"
                );
            }
            Err(message) => {
                tracing::warn!(
                    request_id = %request.request_id,
                    key = %request.key,
                    %message,
                    "Range fetch failed"
                );
            }
        }

        self.reissue_pending(&request.key)
    }

    /// Re-issue the parked range for a key if it is still unsatisfied
    fn reissue_pending(&mut self, key: &FetchKey) -> Option<RangeRequest> {
        let parked = self.pending.remove(key)?;

        let satisfied = if parked.append {
            self.cursor(key)
                .is_some_and(|c| c.is_fully_loaded() || c.loaded_count >= parked.end)
        } else {
            let clamped_end = match self.cache(key).and_then(RangeCache::total_count) {
                Some(total) => parked.end.min(total),
                None => parked.end,
            };
            self.cache(key)
                .is_some_and(|cache| cache.is_range_loaded(parked.start..clamped_end))
        };

        if satisfied {
            return None;
        }
        self.begin(key.clone(), parked.start, parked.end, parked.append)
    }

    // ==================== Parameters ====================

    /// Change the search term and drop all cached state
    ///
    /// Bumps the epoch so completions from fetches issued under the previous
    /// parameters are discarded instead of merged.
    pub fn set_search(&mut self, term: Option<String>) {
        self.search = term;
        self.invalidate_all();
    }

    /// Current search term
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Drop every cache and cursor, keeping the search term
    pub fn invalidate_all(&mut self) {
        self.caches.clear();
        self.cursors.clear();
        self.pending.clear();
        self.loading_keys.clear();
        self.epoch += 1;
    }

    // ==================== Lookups ====================

    /// Cache for a key, if any fetch has touched it
    pub fn cache(&self, key: &FetchKey) -> Option<&RangeCache<T>> {
        self.caches.get(key)
    }

    /// Cursor for a key, if any fetch has touched it
    pub fn cursor(&self, key: &FetchKey) -> Option<&PaginationCursor> {
        self.cursors.get(key)
    }

    /// Cursor for a key, defaulting to an untouched one
    pub fn cursor_or_default(&self, key: &FetchKey) -> PaginationCursor {
        self.cursors.get(key).cloned().unwrap_or_default()
    }

    /// Cached item lookup for a key
    pub fn cached_row(&self, key: &FetchKey, index: usize) -> Option<&T> {
        self.caches.get(key).and_then(|cache| cache.cached_row(index))
    }

    /// Whether a fetch for this key is in flight
    pub fn is_loading(&self, key: &FetchKey) -> bool {
        self.cursors.get(key).is_some_and(|c| c.is_loading)
    }

    /// Keys with a fetch in flight (for loading indicators)
    pub fn loading_keys(&self) -> &AHashSet<FetchKey> {
        &self.loading_keys
    }

    /// Whether any fetch is in flight
    pub fn any_loading(&self) -> bool {
        !self.loading_keys.is_empty()
    }
}

impl<T> Default for FetchCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FetchCoordinator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("keys", &self.cursors.len())
            .field("loading", &self.loading_keys.len())
            .field("epoch", &self.epoch)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(items: Vec<u32>, total: usize) -> Result<RangeSlice<u32>, Arc<str>> {
        Ok(RangeSlice {
            items,
            total_count: total,
        })
    }

    #[test]
    fn test_begin_guard_drops_second_request() {
        let mut coordinator: FetchCoordinator<u32> = FetchCoordinator::new();

        let first = coordinator.begin(FetchKey::Root, 0, 10, false);
        assert!(first.is_some());

        // Same key while in flight: not dispatched.
        let second = coordinator.begin(FetchKey::Root, 10, 20, false);
        assert!(second.is_none());

        // A different key is independent.
        let other = coordinator.begin(FetchKey::node("g-1"), 0, 10, false);
        assert!(other.is_some());
    }

    #[test]
    fn test_complete_merges_and_updates_cursor() {
        let mut coordinator: FetchCoordinator<u32> = FetchCoordinator::new();
        let request = coordinator
            .begin(FetchKey::Root, 0, 10, false)
            .expect("request");

        coordinator.complete(&request, slice((0..10).collect(), 25));

        let cursor = coordinator.cursor(&FetchKey::Root).expect("cursor");
        assert_eq!(cursor.loaded_count, 10);
        assert_eq!(cursor.total_count, Some(25));
        assert!(!cursor.is_loading);
        assert_eq!(coordinator.cached_row(&FetchKey::Root, 9), Some(&9));
        assert!(!coordinator.is_loading(&FetchKey::Root));
    }

    #[test]
    fn test_append_grows_loaded_count_monotonically() {
        let mut coordinator: FetchCoordinator<u32> = FetchCoordinator::new();
        let first = coordinator
            .begin(FetchKey::Root, 0, 10, false)
            .expect("request");
        coordinator.complete(&first, slice((0..10).collect(), 25));

        let before: Vec<_> = (0..10)
            .map(|i| coordinator.cached_row(&FetchKey::Root, i).copied())
            .collect();

        let second = coordinator
            .begin(FetchKey::Root, 10, 20, true)
            .expect("request");
        coordinator.complete(&second, slice((10..20).collect(), 25));

        let cursor = coordinator.cursor(&FetchKey::Root).expect("cursor");
        assert_eq!(cursor.loaded_count, 20);

        let after: Vec<_> = (0..10)
            .map(|i| coordinator.cached_row(&FetchKey::Root, i).copied())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_failure_keeps_last_good_state() {
        let mut coordinator: FetchCoordinator<u32> = FetchCoordinator::new();
        let first = coordinator
            .begin(FetchKey::Root, 0, 10, false)
            .expect("request");
        coordinator.complete(&first, slice((0..10).collect(), 25));

        let retry = coordinator
            .begin(FetchKey::Root, 10, 20, true)
            .expect("request");
        coordinator.complete(&retry, Err("connection reset".into()));

        let cursor = coordinator.cursor(&FetchKey::Root).expect("cursor");
        assert_eq!(cursor.loaded_count, 10);
        assert_eq!(cursor.total_count, Some(25));
        assert!(!cursor.is_loading);
        assert_eq!(coordinator.cached_row(&FetchKey::Root, 5), Some(&5));

        // The guard cleared, so the next viewport event can retry.
        assert!(coordinator.begin(FetchKey::Root, 10, 20, true).is_some());
    }

    #[test]
    fn test_superseded_range_reissued_on_completion() {
        let mut coordinator: FetchCoordinator<u32> = FetchCoordinator::new();
        let first = coordinator
            .begin(FetchKey::Root, 0, 10, false)
            .expect("request");

        // Viewport moved while the first fetch was in flight.
        assert!(coordinator.begin(FetchKey::Root, 40, 50, false).is_none());

        let follow_up = coordinator.complete(&first, slice((0..10).collect(), 100));
        let follow_up = follow_up.expect("pending range re-issued");
        assert_eq!(follow_up.start, 40);
        assert_eq!(follow_up.end, 50);
        assert!(coordinator.is_loading(&FetchKey::Root));
    }

    #[test]
    fn test_satisfied_pending_range_is_not_reissued() {
        let mut coordinator: FetchCoordinator<u32> = FetchCoordinator::new();
        let first = coordinator
            .begin(FetchKey::Root, 0, 10, false)
            .expect("request");

        // Redundant request for a sub-range the in-flight fetch will cover.
        assert!(coordinator.begin(FetchKey::Root, 0, 5, false).is_none());

        let follow_up = coordinator.complete(&first, slice((0..10).collect(), 25));
        assert!(follow_up.is_none());
    }

    #[test]
    fn test_stale_epoch_completion_is_discarded() {
        let mut coordinator: FetchCoordinator<u32> = FetchCoordinator::new();
        let request = coordinator
            .begin(FetchKey::Root, 0, 10, false)
            .expect("request");

        coordinator.set_search(Some("van".to_string()));
        coordinator.complete(&request, slice((0..10).collect(), 25));

        assert!(coordinator.cache(&FetchKey::Root).is_none());
        assert_eq!(coordinator.cursor_or_default(&FetchKey::Root).loaded_count, 0);
    }

    #[test]
    fn test_invalidate_all_resets_every_key() {
        let mut coordinator: FetchCoordinator<u32> = FetchCoordinator::new();
        let root = coordinator
            .begin(FetchKey::Root, 0, 10, false)
            .expect("request");
        coordinator.complete(&root, slice((0..10).collect(), 10));
        let child = coordinator
            .begin(FetchKey::node("g-1"), 0, 10, false)
            .expect("request");
        coordinator.complete(&child, slice((0..3).collect(), 3));

        coordinator.invalidate_all();

        assert!(coordinator.cache(&FetchKey::Root).is_none());
        assert!(coordinator.cache(&FetchKey::node("g-1")).is_none());
        assert!(!coordinator.any_loading());
    }
}
