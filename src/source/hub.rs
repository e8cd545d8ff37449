//! Source Hub
//!
//! Owns the remote source and the channel pair carrying fetch completions
//! back to controller state. Dispatched fetches run as detached tokio tasks;
//! nobody awaits them and no cancellation is propagated. A dropped
//! controller simply stops draining the channel.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use super::events::FetchEvent;
use super::range_source::RangeSource;
use super::runtime::spawn_in_tokio;
use crate::dataview::coordinator::RangeRequest;

/// Hub connecting one remote source to one data view
pub struct SourceHub<T> {
    source: Arc<dyn RangeSource<T>>,
    tx: Sender<FetchEvent<T>>,
    rx: Receiver<FetchEvent<T>>,
}

impl<T: Send + 'static> SourceHub<T> {
    /// Create a hub over the given source
    pub fn new(source: Arc<dyn RangeSource<T>>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { source, tx, rx }
    }

    /// Get the completion receiver for the state layer
    pub fn events(&self) -> Receiver<FetchEvent<T>> {
        self.rx.clone()
    }

    /// Dispatch a range fetch
    ///
    /// Returns immediately; the outcome arrives as a `FetchEvent::Completed`
    /// on the events channel.
    pub fn dispatch(&self, request: RangeRequest) {
        tracing::debug!(
            request_id = %request.request_id,
            key = %request.key,
            start = request.start,
            end = request.end,
            append = request.append,
            "Dispatching range fetch"
        );

        let source = self.source.clone();
        let tx = self.tx.clone();

        spawn_in_tokio(async move {
            let result = source
                .fetch_range(request.clone())
                .await
                .map_err(|e| Arc::<str>::from(e.to_string().as_str()));

            if tx.send(FetchEvent::Completed { request, result }).is_err() {
                tracing::debug!("Fetch completed after its consumer was dropped");
            }
        });
    }
}

impl<T> Clone for SourceHub<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            tx: self.tx.clone(),
            rx: self.rx.clone(),
        }
    }
}

impl<T> std::fmt::Debug for SourceHub<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceHub")
            .field("queued", &self.rx.len())
            .finish()
    }
}
