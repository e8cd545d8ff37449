//! Data-View Core
//!
//! The incremental paginated list machinery shared by every screen: a
//! sparse range cache per fetch scope, a guarded fetch coordinator, the
//! viewport window policy, the tree flattener, and the selection overlay,
//! composed into one controller facade per view shape.
//!
//! ## Control flow
//!
//! ```text
//! rendering surface ──on_rows_rendered──▶ controller
//!        ▲                                   │ missing ranges
//!        │ rows / counts / flags             ▼
//!        │                            FetchCoordinator ──▶ SourceHub
//!        │                                   ▲                │
//!        └────────── pump ◀── FetchEvent ────┴────────────────┘
//! ```

pub mod controller;
pub mod coordinator;
pub mod cursor;
pub mod range_cache;
pub mod selection;
pub mod tree;
pub mod viewport;

pub use controller::{CardGridController, GridController, LastAction, RowSlot, TreeController};
pub use coordinator::{FetchCoordinator, RangeRequest, RangeSlice};
pub use cursor::{FetchKey, PaginationCursor};
pub use range_cache::RangeCache;
pub use selection::SelectionOverlay;
pub use tree::{flatten, ChildrenState, ExpansionState, FlattenedRow, RowKind, TreeItem};
pub use viewport::{RenderedRange, ViewportPolicy};
