//! Fetch Keys and Pagination Cursors
//!
//! A `FetchKey` identifies one pagination scope: the root list of a view, or
//! the children of a specific tree node. Each key owns one range cache, one
//! cursor, and one in-flight guard.

use std::sync::Arc;

/// Identifier of a pagination scope
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum FetchKey {
    /// The root list of a flat view, grid, or tree
    #[default]
    Root,
    /// Children of the tree node with this id
    Node(Arc<str>),
}

impl FetchKey {
    /// Create a key for a tree node's children
    pub fn node(id: impl Into<Arc<str>>) -> Self {
        Self::Node(id.into())
    }

    /// The node id, if this is a node scope
    pub fn node_id(&self) -> Option<&str> {
        match self {
            FetchKey::Root => None,
            FetchKey::Node(id) => Some(id),
        }
    }
}

impl std::fmt::Display for FetchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchKey::Root => write!(f, "root"),
            FetchKey::Node(id) => write!(f, "node:{}", id),
        }
    }
}

/// Pagination bookkeeping for one fetch key
///
/// Tracked separately from the sparse cache so "is there more to load" never
/// requires rescanning the item map.
#[derive(Clone, Debug, Default)]
pub struct PaginationCursor {
    /// Items loaded so far for this key
    pub loaded_count: usize,
    /// Total reported by the backend; `None` until the first fetch completes
    pub total_count: Option<usize>,
    /// Whether a fetch for this key is in flight
    pub is_loading: bool,
}

impl PaginationCursor {
    /// Whether every item for this key has been loaded
    pub fn is_fully_loaded(&self) -> bool {
        matches!(self.total_count, Some(total) if self.loaded_count >= total)
    }

    /// Whether more items remain (or the total is still unknown)
    pub fn has_more(&self) -> bool {
        !self.is_fully_loaded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_key_identity() {
        let a = FetchKey::node("g-1");
        let b = FetchKey::node("g-1");
        assert_eq!(a, b);
        assert_eq!(a.node_id(), Some("g-1"));
        assert_eq!(FetchKey::Root.node_id(), None);
    }

    #[test]
    fn test_cursor_has_more() {
        let mut cursor = PaginationCursor::default();
        assert!(cursor.has_more()); // total unknown

        cursor.loaded_count = 10;
        cursor.total_count = Some(25);
        assert!(cursor.has_more());
        assert!(!cursor.is_fully_loaded());

        cursor.loaded_count = 25;
        assert!(cursor.is_fully_loaded());
        assert!(!cursor.has_more());
    }
}
