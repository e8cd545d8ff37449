//! Debouncer for rapidly-changing input values
//!
//! Holds the latest value until a quiet period elapses, then releases it
//! once. Used to keep search-term keystrokes from turning into a request
//! storm against the backend.

use std::time::{Duration, Instant};

/// A deadline-based debouncer
///
/// `update` arms (or re-arms) the deadline with a new value; `poll` returns
/// the value once, after the quiet window has passed without further updates.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create a new debouncer with the given quiet window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a new value, restarting the quiet window
    pub fn update(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.window));
    }

    /// Take the pending value if its quiet window has elapsed
    pub fn poll(&mut self) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if Instant::now() >= *deadline => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Whether a value is waiting for its window to elapse
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending value without releasing it
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
