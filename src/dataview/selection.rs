//! SelectionOverlay - Row Selection State
//!
//! Tracks the selected row-id set for grid views and derives the
//! select-all / indeterminate header state from the ids currently visible.

use ahash::AHashSet;

/// Observer invoked with the full selection after every change
pub type SelectionObserver = Box<dyn Fn(&AHashSet<String>)>;

/// Selected-row overlay for a grid view
#[derive(Default)]
pub struct SelectionOverlay {
    selected: AHashSet<String>,
    on_change: Option<SelectionObserver>,
}

impl SelectionOverlay {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the change observer (e.g., a bulk-action toolbar)
    pub fn set_on_change(&mut self, observer: impl Fn(&AHashSet<String>) + 'static) {
        self.on_change = Some(Box::new(observer));
    }

    fn notify(&self) {
        if let Some(observer) = &self.on_change {
            observer(&self.selected);
        }
    }

    // ==================== Mutations ====================

    /// Flip membership of one row id
    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        self.notify();
    }

    /// Select-all / clear-all from the header checkbox
    ///
    /// Checking replaces the selection wholesale with the currently visible
    /// ids; unchecking clears everything, including rows selected while a
    /// different page was visible.
    pub fn toggle_all(&mut self, checked: bool, visible_ids: &[String]) {
        if checked {
            self.selected = visible_ids.iter().cloned().collect();
        } else {
            self.selected.clear();
        }
        self.notify();
    }

    /// Drop the selection without notifying (view teardown)
    pub fn reset(&mut self) {
        self.selected.clear();
    }

    // ==================== Derived state ====================

    /// Whether a row id is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected rows
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The selected ids
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Header checkbox: every visible row is selected
    pub fn is_all_selected(&self, visible_ids: &[String]) -> bool {
        !visible_ids.is_empty() && visible_ids.iter().all(|id| self.selected.contains(id))
    }

    /// Header checkbox: some but not all visible rows are selected
    pub fn is_indeterminate(&self, visible_ids: &[String]) -> bool {
        let selected_visible = visible_ids
            .iter()
            .filter(|id| self.selected.contains(*id))
            .count();
        selected_visible > 0 && selected_visible < visible_ids.len()
    }
}

impl std::fmt::Debug for SelectionOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionOverlay")
            .field("selected", &self.selected)
            .field("has_observer", &self.on_change.is_some())
            .finish()
    }
}
