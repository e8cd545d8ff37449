//! TreeFlattener - Hierarchy to Visible Rows
//!
//! Converts the partially-expanded, partially-loaded group hierarchy into
//! the flat ordered list a virtualization surface renders. Recomputed on
//! every cache or expansion change; never persisted.

use ahash::AHashSet;

use super::coordinator::FetchCoordinator;
use super::cursor::FetchKey;
use crate::domain::group::FleetGroup;

/// An item that can appear in a tree view
pub trait TreeItem {
    /// Stable row id
    fn id(&self) -> &str;
    /// Whether the backend reports children under this item
    fn has_children(&self) -> bool;
}

impl TreeItem for FleetGroup {
    fn id(&self) -> &str {
        &self.id
    }

    fn has_children(&self) -> bool {
        self.has_children
    }
}

/// Set of expanded node ids
///
/// Presence means children are flattened into the visible list. Mutated only
/// by explicit toggles or programmatic pre-expansion.
#[derive(Clone, Debug, Default)]
pub struct ExpansionState {
    expanded: AHashSet<String>,
}

impl ExpansionState {
    /// Create with nothing expanded
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a node; returns true when the node is now expanded
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    /// Expand a node (programmatic pre-expansion)
    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    /// Whether a node is expanded
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Collapse everything
    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

/// What is known about a node's children
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildrenState {
    /// No fetch has completed for this node yet
    Unknown,
    /// A completed fetch reported zero children
    Empty,
    /// At least one child is loaded
    Populated,
}

impl ChildrenState {
    /// Derive the state from a node's coordinator bookkeeping
    pub fn derive<T>(coordinator: &FetchCoordinator<T>, key: &FetchKey) -> Self {
        match coordinator.cursor(key) {
            Some(cursor) if cursor.total_count == Some(0) => ChildrenState::Empty,
            Some(cursor) if cursor.loaded_count > 0 => ChildrenState::Populated,
            _ => ChildrenState::Unknown,
        }
    }
}

/// Payload of a flattened row
#[derive(Clone, Debug)]
pub enum RowKind<T> {
    /// A real item
    Item(T),
    /// Synthetic non-selectable row communicating "no children"
    Placeholder {
        /// Message to render
        message: String,
    },
}

/// One visible row of the flattened tree
#[derive(Clone, Debug)]
pub struct FlattenedRow<T> {
    /// Row id (synthetic for placeholders)
    pub id: String,
    /// Nesting depth, root items at 0
    pub depth: usize,
    /// Id of the parent node, if any
    pub parent_id: Option<String>,
    /// Whether this node is expanded
    pub is_expanded: bool,
    /// Whether a child fetch for this node is in flight
    pub is_loading: bool,
    /// Whether this row is the current selection
    pub is_selected: bool,
    /// Item payload or placeholder
    pub kind: RowKind<T>,
}

impl<T> FlattenedRow<T> {
    /// Whether this is a synthetic placeholder row
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, RowKind::Placeholder { .. })
    }
}

/// Flatten the loaded hierarchy into visible rows
///
/// Depth-first pre-order over the root cache; expanded nodes recurse into
/// their child caches. Selection and loading flags are looked up per id on
/// every call, which stays cheap because flattened lists are bounded by
/// what the viewport can show plus its lookahead.
pub fn flatten<T: TreeItem + Clone>(
    coordinator: &FetchCoordinator<T>,
    expansion: &ExpansionState,
    selected_id: Option<&str>,
    empty_message: &str,
) -> Vec<FlattenedRow<T>> {
    let mut rows = Vec::new();
    flatten_key(
        coordinator,
        &FetchKey::Root,
        expansion,
        selected_id,
        empty_message,
        0,
        None,
        &mut rows,
    );
    rows
}

#[allow(clippy::too_many_arguments)]
fn flatten_key<T: TreeItem + Clone>(
    coordinator: &FetchCoordinator<T>,
    key: &FetchKey,
    expansion: &ExpansionState,
    selected_id: Option<&str>,
    empty_message: &str,
    depth: usize,
    parent_id: Option<&str>,
    rows: &mut Vec<FlattenedRow<T>>,
) {
    let Some(cache) = coordinator.cache(key) else {
        return;
    };

    let last_index = match cache.max_loaded_index() {
        Some(index) => index,
        None => return,
    };

    for index in 0..=last_index {
        let Some(item) = cache.cached_row(index) else {
            continue;
        };

        let id = item.id().to_string();
        let child_key = FetchKey::node(id.as_str());
        let is_expanded = expansion.is_expanded(&id);
        let is_loading = coordinator.is_loading(&child_key);

        rows.push(FlattenedRow {
            id: id.clone(),
            depth,
            parent_id: parent_id.map(str::to_string),
            is_expanded,
            is_loading,
            is_selected: selected_id == Some(id.as_str()),
            kind: RowKind::Item(item.clone()),
        });

        if !is_expanded {
            continue;
        }

        let children = ChildrenState::derive(coordinator, &child_key);
        let confirmed_childless = !item.has_children() || children == ChildrenState::Empty;

        if confirmed_childless && !is_loading {
            rows.push(FlattenedRow {
                id: format!("{}/empty", id),
                depth: depth + 1,
                parent_id: Some(id.clone()),
                is_expanded: false,
                is_loading: false,
                is_selected: false,
                kind: RowKind::Placeholder {
                    message: empty_message.to_string(),
                },
            });
        } else if children == ChildrenState::Populated {
            flatten_key(
                coordinator,
                &child_key,
                expansion,
                selected_id,
                empty_message,
                depth + 1,
                Some(&id),
                rows,
            );
        }
        // ChildrenState::Unknown: nothing is emitted until the first child
        // fetch completes; the viewport tracker issues that fetch.
    }
}
