//! RangeSource Trait
//!
//! Abstraction over remote paginated data: the backend supplies total count
//! plus items by index range. Implementations must be idempotent for
//! identical requests and report the total for the request's search
//! parameters, not a cumulative count.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::dataview::coordinator::{RangeRequest, RangeSlice};
use crate::dataview::cursor::FetchKey;
use crate::error::Result;

/// A remote source of paginated items
pub trait RangeSource<T>: Send + Sync + 'static {
    /// Fetch `[request.start, request.end)` for the request's key
    ///
    /// Must return at most `end - start` items.
    fn fetch_range(&self, request: RangeRequest) -> BoxFuture<'static, Result<RangeSlice<T>>>;
}

/// In-memory source for tests and offline demos
///
/// Serves a root list plus optional per-node child lists, with substring
/// matching on the search term against a caller-supplied haystack.
pub struct MemorySource<T> {
    root: Arc<Vec<T>>,
    children: Arc<ahash::AHashMap<String, Vec<T>>>,
    haystack: Option<Arc<dyn Fn(&T) -> String + Send + Sync>>,
}

impl<T: Clone + Send + Sync + 'static> MemorySource<T> {
    /// Create a source serving only a root list
    pub fn new(root: Vec<T>) -> Self {
        Self {
            root: Arc::new(root),
            children: Arc::new(ahash::AHashMap::new()),
            haystack: None,
        }
    }

    /// Attach child lists per node id
    pub fn with_children(mut self, children: ahash::AHashMap<String, Vec<T>>) -> Self {
        self.children = Arc::new(children);
        self
    }

    /// Attach the text a search term is matched against (case-insensitive)
    pub fn with_haystack(mut self, haystack: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.haystack = Some(Arc::new(haystack));
        self
    }

    fn slice_of(&self, request: &RangeRequest) -> Result<RangeSlice<T>> {
        let rows: Vec<T> = match &request.key {
            FetchKey::Root => self.root.as_ref().clone(),
            FetchKey::Node(id) => self
                .children
                .get(id.as_ref())
                .cloned()
                .unwrap_or_default(),
        };

        let filtered: Vec<T> = match (&self.haystack, &request.search) {
            (Some(haystack), Some(term)) if !term.is_empty() => {
                let needle = term.to_lowercase();
                rows.into_iter()
                    .filter(|row| haystack(row).to_lowercase().contains(&needle))
                    .collect()
            }
            _ => rows,
        };

        let total_count = filtered.len();
        let start = request.start.min(total_count);
        let end = request.end.min(total_count);
        let items = filtered[start..end].to_vec();

        Ok(RangeSlice { items, total_count })
    }
}

impl<T: Clone + Send + Sync + 'static> RangeSource<T> for MemorySource<T> {
    fn fetch_range(&self, request: RangeRequest) -> BoxFuture<'static, Result<RangeSlice<T>>> {
        let result = self.slice_of(&request);
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::generate_request_id;

    fn request(key: FetchKey, start: usize, end: usize, search: Option<&str>) -> RangeRequest {
        RangeRequest {
            request_id: generate_request_id(),
            key,
            start,
            end,
            append: false,
            search: search.map(str::to_string),
            epoch: 0,
        }
    }

    #[test]
    fn test_root_range_and_total() {
        let source = MemorySource::new((0..25).collect::<Vec<i32>>());
        let slice = source
            .slice_of(&request(FetchKey::Root, 10, 20, None))
            .expect("slice");
        assert_eq!(slice.items, (10..20).collect::<Vec<i32>>());
        assert_eq!(slice.total_count, 25);
    }

    #[test]
    fn test_range_clamped_to_total() {
        let source = MemorySource::new((0..5).collect::<Vec<i32>>());
        let slice = source
            .slice_of(&request(FetchKey::Root, 0, 10, None))
            .expect("slice");
        assert_eq!(slice.items.len(), 5);
        assert_eq!(slice.total_count, 5);
    }

    #[test]
    fn test_search_filters_and_reports_filtered_total() {
        let source = MemorySource::new(vec!["Van 1", "Truck 2", "Van 3"])
            .with_haystack(|row| row.to_string());
        let slice = source
            .slice_of(&request(FetchKey::Root, 0, 10, Some("van")))
            .expect("slice");
        assert_eq!(slice.items, vec!["Van 1", "Van 3"]);
        assert_eq!(slice.total_count, 2);
    }

    #[test]
    fn test_unknown_node_serves_empty() {
        let source = MemorySource::new(vec![1, 2, 3]);
        let slice = source
            .slice_of(&request(FetchKey::node("missing"), 0, 10, None))
            .expect("slice");
        assert!(slice.items.is_empty());
        assert_eq!(slice.total_count, 0);
    }
}
