//! ViewportWindowTracker - Rendered-Range Policy
//!
//! Converts the row/cell range a virtualization surface reports into item
//! index ranges, and decides when the next page should be requested. Pure
//! bookkeeping: the surface supplies viewport signals, the controller acts
//! on the decisions.

use super::cursor::PaginationCursor;
use crate::config::ViewConfig;

/// The contiguous row range a surface has rendered (or is about to render)
///
/// `stop` is inclusive, matching how virtualization surfaces report it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderedRange {
    /// First rendered row index
    pub start: usize,
    /// Last rendered row index (inclusive)
    pub stop: usize,
}

impl RenderedRange {
    /// Create a rendered range
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }
}

/// Window policy for one view
#[derive(Clone, Copy, Debug)]
pub struct ViewportPolicy {
    column_count: usize,
    load_threshold: usize,
    lookahead_rows: usize,
}

impl ViewportPolicy {
    /// Build the policy from a view configuration
    pub fn from_config(config: &ViewConfig) -> Self {
        Self {
            column_count: config.column_count.max(1),
            load_threshold: config.load_threshold,
            lookahead_rows: config.lookahead_rows,
        }
    }

    /// Items rendered per row
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Remaining-row threshold that triggers the next append fetch
    pub fn load_threshold(&self) -> usize {
        self.load_threshold
    }

    /// Convert a rendered row range into the item index range it reveals
    ///
    /// Returns `(first_item, last_item)`, last inclusive.
    pub fn item_range(&self, rows: RenderedRange) -> (usize, usize) {
        let first = rows.start * self.column_count;
        let last = rows.stop * self.column_count + self.column_count - 1;
        (first, last)
    }

    /// Whether the window has scrolled close enough to the end of the
    /// reported rows to warrant appending the next page
    pub fn wants_append(&self, rows: RenderedRange, view_rows: usize) -> bool {
        rows.stop + self.load_threshold >= view_rows
    }

    /// Rows to report to the virtualization surface
    ///
    /// While items remain, enough extra rows are reported to keep the
    /// surface asking for more; once everything is loaded the true row
    /// count is reported exactly.
    pub fn view_row_count(&self, cursor: &PaginationCursor) -> usize {
        let loaded_rows = self.rows_for(cursor.loaded_count);
        match cursor.total_count {
            Some(total) if cursor.loaded_count >= total => self.rows_for(total),
            Some(total) => (loaded_rows + self.lookahead_rows).min(self.rows_for(total)),
            None => loaded_rows + self.lookahead_rows,
        }
    }

    /// Rows needed to show `items` items at this column count
    pub fn rows_for(&self, items: usize) -> usize {
        items.div_ceil(self.column_count)
    }
}
