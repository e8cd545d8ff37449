//! ListController Facades
//!
//! One controller per view shape, all composed from the same parts: the
//! grid (coordinator + viewport + selection), the lazy tree (coordinator +
//! viewport + flattener), and the card gallery (coordinator + viewport with
//! multi-column row math). A rendering surface drives a controller with
//! viewport signals and drains state changes through `pump`.

use std::time::Duration;

use crossbeam_channel::Receiver;

use super::coordinator::FetchCoordinator;
use super::cursor::{FetchKey, PaginationCursor};
use super::selection::SelectionOverlay;
use super::tree::{flatten, ChildrenState, ExpansionState, FlattenedRow, TreeItem};
use super::viewport::{RenderedRange, ViewportPolicy};
use crate::config::ViewConfig;
use crate::helpers::Debouncer;
use crate::source::{FetchEvent, SourceHub};

/// Slot returned for a cell that may not be loaded yet
#[derive(Debug)]
pub enum RowSlot<'a, T> {
    /// The cached item
    Loaded(&'a T),
    /// Not loaded; the surface renders a skeleton card
    Placeholder,
}

impl<'a, T> RowSlot<'a, T> {
    /// The item, if loaded
    pub fn item(&self) -> Option<&'a T> {
        match self {
            RowSlot::Loaded(item) => Some(item),
            RowSlot::Placeholder => None,
        }
    }

    /// Whether this slot is still a placeholder
    pub fn is_placeholder(&self) -> bool {
        matches!(self, RowSlot::Placeholder)
    }
}

/// The action that last changed tree state
///
/// Tracked explicitly so that expanding a node never causes a scroll jump:
/// only selection changes (user clicks or restored state at mount) may move
/// the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LastAction {
    /// Initial mount / restored state
    #[default]
    Initial,
    /// A node was expanded or collapsed
    Expand,
    /// A row was selected
    Select,
}

/// Shared plumbing composed into every facade
struct Engine<T> {
    coordinator: FetchCoordinator<T>,
    policy: ViewportPolicy,
    hub: SourceHub<T>,
    events: Receiver<FetchEvent<T>>,
    debouncer: Debouncer<String>,
    page_size: usize,
}

impl<T: Clone + Send + 'static> Engine<T> {
    fn new(hub: SourceHub<T>, config: &ViewConfig) -> Self {
        Self {
            coordinator: FetchCoordinator::new(),
            policy: ViewportPolicy::from_config(config),
            events: hub.events(),
            hub,
            debouncer: Debouncer::new(config.search_debounce()),
            page_size: config.page_size.max(1),
        }
    }

    /// Route a range request through the per-key guard
    fn request(&mut self, key: FetchKey, start: usize, end: usize, append: bool) {
        if let Some(request) = self.coordinator.begin(key, start, end, append) {
            self.hub.dispatch(request);
        }
    }

    /// Apply queued completions; returns how many were applied
    fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for one completion, then apply everything queued behind it
    fn drain_blocking(&mut self, timeout: Duration) -> usize {
        match self.events.recv_timeout(timeout) {
            Ok(event) => {
                self.apply(event);
                1 + self.drain_events()
            }
            Err(_) => 0,
        }
    }

    fn apply(&mut self, event: FetchEvent<T>) {
        let FetchEvent::Completed { request, result } = event;
        if let Some(follow_up) = self.coordinator.complete(&request, result) {
            self.hub.dispatch(follow_up);
        }
    }

    /// Release a debounced search term; returns true when a refetch started
    fn poll_search(&mut self) -> bool {
        let Some(term) = self.debouncer.poll() else {
            return false;
        };
        let term = (!term.is_empty()).then_some(term);
        self.coordinator.set_search(term);
        self.request(FetchKey::Root, 0, self.page_size, false);
        true
    }

    fn set_search(&mut self, term: impl Into<String>) {
        self.debouncer.update(term.into());
    }

    /// Drop all cached state and fetch the first page again
    fn refetch(&mut self) {
        self.coordinator.invalidate_all();
        self.request(FetchKey::Root, 0, self.page_size, false);
    }

    fn root_cursor(&self) -> PaginationCursor {
        self.coordinator.cursor_or_default(&FetchKey::Root)
    }

    /// Fetch whatever the rendered window reveals, then top up via the
    /// threshold policy
    fn ensure_window(&mut self, rows: RenderedRange) {
        let (first, last) = self.policy.item_range(rows);
        let end = last + 1;

        let cursor = self.root_cursor();
        let clamped_end = cursor.total_count.map_or(end, |total| end.min(total));
        let window_loaded = self
            .coordinator
            .cache(&FetchKey::Root)
            .is_some_and(|cache| cache.is_range_loaded(first..clamped_end));

        if clamped_end > first && !window_loaded {
            self.request(FetchKey::Root, first, end, false);
        }

        // Re-read: the window request above may have taken the guard. The
        // append start must never be computed from a stale loaded count, so
        // an in-flight key skips the top-up; the render event after that
        // completion retries.
        let cursor = self.root_cursor();
        if cursor.is_loading || !cursor.has_more() {
            return;
        }
        let view_rows = self.policy.view_row_count(&cursor);
        if self.policy.wants_append(rows, view_rows) {
            let start = cursor.loaded_count;
            self.request(FetchKey::Root, start, start + self.page_size, true);
        }
    }
}

// ==================== Grid ====================

/// Controller for server-side paginated data grids
///
/// Every table screen (vehicles, reservations, maintenance) drives one of
/// these: a row cache, viewport-fed fetching, and the selection overlay for
/// bulk actions.
pub struct GridController<T> {
    engine: Engine<T>,
    selection: SelectionOverlay,
}

impl<T: Clone + Send + 'static> GridController<T> {
    /// Create a grid controller over a source hub
    pub fn new(hub: SourceHub<T>, config: &ViewConfig) -> Self {
        Self {
            engine: Engine::new(hub, config),
            selection: SelectionOverlay::new(),
        }
    }

    /// Apply queued fetch completions and debounced search changes
    ///
    /// Returns true when state changed and the surface should re-render.
    pub fn pump(&mut self) -> bool {
        let searched = self.engine.poll_search();
        self.engine.drain_events() > 0 || searched
    }

    /// Like `pump`, but waits up to `timeout` for the next completion
    pub fn pump_blocking(&mut self, timeout: Duration) -> bool {
        let searched = self.engine.poll_search();
        self.engine.drain_blocking(timeout) > 0 || searched
    }

    /// Viewport signal: the surface rendered (or is about to render) rows
    pub fn on_rows_rendered(&mut self, rows: RenderedRange) {
        self.engine.ensure_window(rows);
    }

    /// Cached row lookup; None renders as a skeleton row
    pub fn row(&self, index: usize) -> Option<&T> {
        self.engine.coordinator.cached_row(&FetchKey::Root, index)
    }

    /// Rows to report to the virtualization surface
    pub fn view_row_count(&self) -> usize {
        self.engine.policy.view_row_count(&self.engine.root_cursor())
    }

    /// Total items reported by the backend, once known
    pub fn total_items(&self) -> Option<usize> {
        self.engine.root_cursor().total_count
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.engine.coordinator.is_loading(&FetchKey::Root)
    }

    /// Force a server-side refetch
    ///
    /// Screens call this after an out-of-band mutation (e.g., a status
    /// change submitted through an embedded dropdown) so the grid reflects
    /// the backend again.
    pub fn refetch(&mut self) {
        self.engine.refetch();
    }

    /// Update the search term; applied after the debounce window
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.engine.set_search(term);
    }

    /// The active (already applied) search term
    pub fn search(&self) -> Option<&str> {
        self.engine.coordinator.search()
    }

    /// Selection overlay (read)
    pub fn selection(&self) -> &SelectionOverlay {
        &self.selection
    }

    /// Selection overlay (mutate)
    pub fn selection_mut(&mut self) -> &mut SelectionOverlay {
        &mut self.selection
    }
}

impl<T> std::fmt::Debug for GridController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridController")
            .field("coordinator", &self.engine.coordinator)
            .field("selection", &self.selection)
            .finish()
    }
}

// ==================== Tree ====================

/// Controller for the lazy-loading fleet-group tree
pub struct TreeController<T> {
    engine: Engine<T>,
    expansion: ExpansionState,
    selected: Option<String>,
    last_action: LastAction,
    scroll_pending: bool,
    scroll_request: Option<usize>,
    empty_message: String,
}

impl<T: TreeItem + Clone + Send + 'static> TreeController<T> {
    /// Create a tree controller over a source hub
    pub fn new(hub: SourceHub<T>, config: &ViewConfig) -> Self {
        Self {
            engine: Engine::new(hub, config),
            expansion: ExpansionState::new(),
            selected: None,
            last_action: LastAction::Initial,
            scroll_pending: false,
            scroll_request: None,
            empty_message: "No entries".to_string(),
        }
    }

    /// Set the message shown for confirmed-childless nodes
    pub fn set_empty_message(&mut self, message: impl Into<String>) {
        self.empty_message = message.into();
    }

    /// The current flattened view of the tree
    pub fn flattened_rows(&self) -> Vec<FlattenedRow<T>> {
        flatten(
            &self.engine.coordinator,
            &self.expansion,
            self.selected.as_deref(),
            &self.empty_message,
        )
    }

    /// Expand or collapse a node
    ///
    /// Expanding a node whose children are unknown starts their first fetch.
    pub fn toggle_expand(&mut self, id: &str) {
        self.last_action = LastAction::Expand;
        let expanded = self.expansion.toggle(id);
        if !expanded {
            return;
        }

        let key = FetchKey::node(id);
        if ChildrenState::derive(&self.engine.coordinator, &key) == ChildrenState::Unknown
            && !self.engine.coordinator.is_loading(&key)
        {
            let page = self.engine.page_size;
            self.engine.request(key, 0, page, false);
        }
    }

    /// Select a row (user click)
    pub fn select(&mut self, id: Option<String>) {
        self.last_action = LastAction::Select;
        self.selected = id;
        self.scroll_pending = self.selected.is_some();
        self.resolve_scroll();
    }

    /// Restore a selection at mount without counting as a user action
    ///
    /// The scroll still fires once the selected row is loaded, but the
    /// action stays `Initial`.
    pub fn restore_selection(&mut self, id: Option<String>) {
        self.last_action = LastAction::Initial;
        self.selected = id;
        self.scroll_pending = self.selected.is_some();
        self.resolve_scroll();
    }

    /// Currently selected row id
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The action that last changed tree state
    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    /// Take the pending scroll-into-view row index, if any
    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.scroll_request.take()
    }

    fn resolve_scroll(&mut self) {
        if !self.scroll_pending {
            return;
        }
        let Some(selected) = self.selected.as_deref() else {
            self.scroll_pending = false;
            return;
        };
        let position = self
            .flattened_rows()
            .iter()
            .position(|row| !row.is_placeholder() && row.id == selected);
        if let Some(index) = position {
            self.scroll_request = Some(index);
            self.scroll_pending = false;
        }
    }

    /// Apply queued fetch completions and debounced search changes
    pub fn pump(&mut self) -> bool {
        let searched = self.engine.poll_search();
        let changed = self.engine.drain_events() > 0 || searched;
        if changed {
            self.resolve_scroll();
        }
        changed
    }

    /// Like `pump`, but waits up to `timeout` for the next completion
    pub fn pump_blocking(&mut self, timeout: Duration) -> bool {
        let searched = self.engine.poll_search();
        let changed = self.engine.drain_blocking(timeout) > 0 || searched;
        if changed {
            self.resolve_scroll();
        }
        changed
    }

    /// Update the search term; applied after the debounce window
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.engine.set_search(term);
    }

    /// Viewport signal over the flattened rows
    ///
    /// Tops up the root list when the window nears the end of the flattened
    /// view, and scans the visible rows for expanded nodes whose loaded
    /// children end near the window.
    pub fn on_rows_rendered(&mut self, rows: RenderedRange) {
        let flat = self.flattened_rows();
        let total_rows = flat.len();
        let threshold = self.engine.policy.load_threshold();
        let page = self.engine.page_size;

        let root = self.engine.root_cursor();
        if rows.stop + threshold >= total_rows && root.has_more() && !root.is_loading {
            let start = root.loaded_count;
            self.engine
                .request(FetchKey::Root, start, start + page, true);
        }

        if total_rows == 0 {
            return;
        }

        let window_start = rows.start.min(total_rows - 1);
        let window_stop = rows.stop.min(total_rows - 1);

        for row in &flat[window_start..=window_stop] {
            if !row.is_expanded {
                continue;
            }
            let key = FetchKey::node(row.id.as_str());
            let cursor = self.engine.coordinator.cursor_or_default(&key);
            if cursor.is_loading {
                continue;
            }

            match cursor.total_count {
                // Expanded (possibly programmatically) but never fetched.
                None => {
                    self.engine.request(key, 0, page, false);
                }
                Some(total) if cursor.loaded_count < total => {
                    let last_child_row = flat
                        .iter()
                        .rposition(|r| r.parent_id.as_deref() == Some(row.id.as_str()));
                    let near_end = last_child_row
                        .is_some_and(|index| index <= rows.stop + threshold);
                    if near_end {
                        let start = cursor.loaded_count;
                        self.engine.request(key, start, start + page, true);
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Whether any fetch (root or node) is in flight
    pub fn is_loading(&self) -> bool {
        self.engine.coordinator.any_loading()
    }
}

impl<T> std::fmt::Debug for TreeController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeController")
            .field("coordinator", &self.engine.coordinator)
            .field("selected", &self.selected)
            .field("last_action", &self.last_action)
            .finish()
    }
}

// ==================== Card gallery ====================

/// Controller for multi-column card galleries (drivers, vehicles)
pub struct CardGridController<T> {
    engine: Engine<T>,
}

impl<T: Clone + Send + 'static> CardGridController<T> {
    /// Create a card-gallery controller over a source hub
    pub fn new(hub: SourceHub<T>, config: &ViewConfig) -> Self {
        Self {
            engine: Engine::new(hub, config),
        }
    }

    /// Item lookup by flat index; unloaded slots render as skeleton cards
    pub fn row(&self, index: usize) -> RowSlot<'_, T> {
        match self.engine.coordinator.cached_row(&FetchKey::Root, index) {
            Some(item) => RowSlot::Loaded(item),
            None => RowSlot::Placeholder,
        }
    }

    /// Items rendered per row
    pub fn column_count(&self) -> usize {
        self.engine.policy.column_count()
    }

    /// Rows to report to the virtualization surface
    pub fn view_row_count(&self) -> usize {
        self.engine.policy.view_row_count(&self.engine.root_cursor())
    }

    /// Total items reported by the backend, once known
    pub fn total_items(&self) -> Option<usize> {
        self.engine.root_cursor().total_count
    }

    /// Viewport signal: card rows rendered
    pub fn on_rows_rendered(&mut self, rows: RenderedRange) {
        self.engine.ensure_window(rows);
    }

    /// Apply queued fetch completions and debounced search changes
    pub fn pump(&mut self) -> bool {
        let searched = self.engine.poll_search();
        self.engine.drain_events() > 0 || searched
    }

    /// Like `pump`, but waits up to `timeout` for the next completion
    pub fn pump_blocking(&mut self, timeout: Duration) -> bool {
        let searched = self.engine.poll_search();
        self.engine.drain_blocking(timeout) > 0 || searched
    }

    /// Update the search term; applied after the debounce window
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.engine.set_search(term);
    }

    /// Force a server-side refetch
    pub fn refetch(&mut self) {
        self.engine.refetch();
    }
}

impl<T> std::fmt::Debug for CardGridController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardGridController")
            .field("coordinator", &self.engine.coordinator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::driver::DriverRecord;
    use crate::domain::group::FleetGroup;
    use crate::domain::vehicle::VehicleRecord;
    use crate::source::MemorySource;
    use ahash::AHashMap;
    use std::sync::Arc;

    const WAIT: Duration = Duration::from_secs(5);
    const SETTLE: Duration = Duration::from_millis(300);

    fn vehicles(count: usize) -> Vec<VehicleRecord> {
        (0..count)
            .map(|i| VehicleRecord::new(format!("v-{i}"), format!("Vehicle {i}")))
            .collect()
    }

    fn view(page_size: usize, column_count: usize) -> ViewConfig {
        ViewConfig {
            page_size,
            column_count,
            search_debounce_ms: 0,
            ..Default::default()
        }
    }

    fn grid(total: usize, page_size: usize) -> GridController<VehicleRecord> {
        let hub = SourceHub::new(Arc::new(
            MemorySource::new(vehicles(total)).with_haystack(|v| v.name.clone()),
        ));
        GridController::new(hub, &view(page_size, 1))
    }

    /// Drive a grid like a rendering surface: render, pump, repeat until idle.
    fn settle(grid: &mut GridController<VehicleRecord>) {
        loop {
            let last_row = grid.view_row_count().saturating_sub(1);
            grid.on_rows_rendered(RenderedRange::new(0, last_row));
            if !grid.pump_blocking(SETTLE) {
                break;
            }
        }
    }

    #[test]
    fn test_grid_pagination_scenario() {
        let mut grid = grid(25, 10);

        grid.on_rows_rendered(RenderedRange::new(0, 9));
        assert!(grid.pump_blocking(WAIT));

        assert_eq!(grid.total_items(), Some(25));
        assert_eq!(grid.row(0).expect("row 0").id, "v-0");
        assert_eq!(grid.row(9).expect("row 9").id, "v-9");
        assert!(grid.row(10).is_none());

        // 10 loaded + lookahead, but never past the known total.
        assert!(grid.view_row_count() >= 20);
        assert!(grid.view_row_count() <= 25);

        settle(&mut grid);
        assert_eq!(grid.view_row_count(), 25);
        assert_eq!(grid.row(24).expect("row 24").id, "v-24");
    }

    #[test]
    fn test_grid_refetch_reloads_first_page() {
        let mut grid = grid(25, 10);
        grid.on_rows_rendered(RenderedRange::new(0, 9));
        assert!(grid.pump_blocking(WAIT));

        grid.refetch();
        assert!(grid.pump_blocking(WAIT));
        assert_eq!(grid.total_items(), Some(25));
        assert_eq!(grid.row(0).expect("row 0").id, "v-0");
    }

    #[test]
    fn test_grid_search_invalidate_and_refetch() {
        let mut grid = grid(25, 10);
        grid.on_rows_rendered(RenderedRange::new(0, 9));
        assert!(grid.pump_blocking(WAIT));

        // "Vehicle 1" matches 1, 10..19: 11 records.
        grid.set_search("Vehicle 1");
        assert!(grid.pump_blocking(WAIT));
        assert_eq!(grid.total_items(), Some(11));
        assert_eq!(grid.row(0).expect("row 0").id, "v-1");
        assert_eq!(grid.search(), Some("Vehicle 1"));
    }

    fn drivers(count: usize) -> Vec<DriverRecord> {
        (0..count)
            .map(|i| DriverRecord::new(format!("d-{i}"), format!("Driver {i}")))
            .collect()
    }

    #[test]
    fn test_card_grid_three_column_scenario() {
        let hub = SourceHub::new(Arc::new(MemorySource::new(drivers(30))));
        let mut cards = CardGridController::new(hub, &view(30, 3));

        // Rows 0..=2 at 3 columns reveal items 0..=8.
        cards.on_rows_rendered(RenderedRange::new(0, 2));
        assert!(cards.pump_blocking(WAIT));

        assert!(!cards.row(6).is_placeholder());
        assert!(!cards.row(8).is_placeholder());
        assert_eq!(
            cards.row(8).item().expect("item 8").id,
            "d-8"
        );
        assert!(cards.row(9).is_placeholder());
        assert_eq!(cards.total_items(), Some(30));
        assert_eq!(cards.column_count(), 3);
    }

    fn group_hub() -> SourceHub<FleetGroup> {
        let root = vec![
            FleetGroup::branch("north", "North Region"),
            FleetGroup::branch("south", "South Region"),
            FleetGroup::branch("vacant", "Vacant Region"),
        ];
        let mut children: AHashMap<String, Vec<FleetGroup>> = AHashMap::new();
        children.insert(
            "north".to_string(),
            vec![
                FleetGroup::leaf("n-1", "Depot N1"),
                FleetGroup::leaf("n-2", "Depot N2"),
            ],
        );
        children.insert(
            "south".to_string(),
            vec![FleetGroup::leaf("s-1", "Depot S1")],
        );
        SourceHub::new(Arc::new(MemorySource::new(root).with_children(children)))
    }

    #[test]
    fn test_tree_expand_loads_children() {
        let mut tree = TreeController::new(group_hub(), &view(10, 1));

        tree.on_rows_rendered(RenderedRange::new(0, 5));
        assert!(tree.pump_blocking(WAIT));
        assert_eq!(tree.flattened_rows().len(), 3);

        tree.toggle_expand("north");
        assert!(tree.pump_blocking(WAIT));

        let rows = tree.flattened_rows();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["north", "n-1", "n-2", "south", "vacant"]);
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[1].parent_id.as_deref(), Some("north"));
    }

    #[test]
    fn test_tree_collapse_hides_children_without_refetch() {
        let mut tree = TreeController::new(group_hub(), &view(10, 1));
        tree.on_rows_rendered(RenderedRange::new(0, 5));
        assert!(tree.pump_blocking(WAIT));
        tree.toggle_expand("north");
        assert!(tree.pump_blocking(WAIT));

        tree.toggle_expand("north");
        assert_eq!(tree.flattened_rows().len(), 3);

        // Re-expanding reuses the cache: no new fetch, rows are back.
        tree.toggle_expand("north");
        assert_eq!(tree.flattened_rows().len(), 5);
        assert!(!tree.is_loading());
    }

    #[test]
    fn test_tree_confirmed_empty_shows_placeholder() {
        let mut tree = TreeController::new(group_hub(), &view(10, 1));
        tree.on_rows_rendered(RenderedRange::new(0, 5));
        assert!(tree.pump_blocking(WAIT));

        tree.set_empty_message("No subgroups");
        tree.toggle_expand("vacant");
        assert!(tree.pump_blocking(WAIT));

        let rows = tree.flattened_rows();
        assert_eq!(rows.len(), 4);
        let placeholder = rows
            .iter()
            .find(|r| r.is_placeholder())
            .expect("placeholder row");
        assert_eq!(placeholder.parent_id.as_deref(), Some("vacant"));
    }

    #[test]
    fn test_tree_select_scrolls_but_expand_does_not() {
        let mut tree = TreeController::new(group_hub(), &view(10, 1));
        tree.on_rows_rendered(RenderedRange::new(0, 5));
        assert!(tree.pump_blocking(WAIT));

        tree.select(Some("south".to_string()));
        assert_eq!(tree.last_action(), LastAction::Select);
        assert_eq!(tree.take_scroll_request(), Some(1));
        assert_eq!(tree.take_scroll_request(), None);

        tree.toggle_expand("north");
        assert!(tree.pump_blocking(WAIT));
        assert_eq!(tree.last_action(), LastAction::Expand);
        // Children loading finished, but expansion never scrolls.
        assert_eq!(tree.take_scroll_request(), None);
    }

    #[test]
    fn test_tree_restored_selection_scrolls_after_initial_load() {
        let mut tree = TreeController::new(group_hub(), &view(10, 1));
        tree.restore_selection(Some("south".to_string()));
        assert_eq!(tree.take_scroll_request(), None); // nothing loaded yet

        tree.on_rows_rendered(RenderedRange::new(0, 5));
        assert!(tree.pump_blocking(WAIT));

        assert_eq!(tree.last_action(), LastAction::Initial);
        assert_eq!(tree.take_scroll_request(), Some(1));
    }

    #[test]
    fn test_selection_overlay_wiring() {
        let mut grid = grid(5, 10);
        grid.on_rows_rendered(RenderedRange::new(0, 4));
        assert!(grid.pump_blocking(WAIT));

        let visible: Vec<String> = (0..5).map(|i| format!("v-{i}")).collect();
        grid.selection_mut().toggle("v-1");
        assert!(grid.selection().is_indeterminate(&visible));

        grid.selection_mut().toggle_all(true, &visible);
        assert!(grid.selection().is_all_selected(&visible));
        assert_eq!(grid.selection().len(), 5);
    }
}
