//! Group - Fleet Group Tree Node

use serde::{Deserialize, Serialize};

/// A fleet group node for the tree view
///
/// Groups form a hierarchy (region -> depot -> fleet); children are fetched
/// lazily per group when a node is expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetGroup {
    /// Unique ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the backend reports child groups under this node
    pub has_children: bool,
    /// Number of vehicles directly in this group
    pub vehicle_count: u32,
}

impl FleetGroup {
    /// Create a leaf group (tests and offline demos)
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            has_children: false,
            vehicle_count: 0,
        }
    }

    /// Create a group that reports children
    pub fn branch(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            has_children: true,
            vehicle_count: 0,
        }
    }
}
