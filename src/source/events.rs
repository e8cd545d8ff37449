//! Fetch Events
//!
//! Events emitted by the source layer to be applied to controller state on
//! the host's thread.

use std::sync::Arc;

use crate::dataview::coordinator::{RangeRequest, RangeSlice};

/// Events emitted by the source layer
#[derive(Clone, Debug)]
pub enum FetchEvent<T> {
    /// A dispatched range fetch finished
    Completed {
        /// The request that was dispatched
        request: RangeRequest,
        /// Fetched page, or the failure message
        result: Result<RangeSlice<T>, Arc<str>>,
    },
}

/// Generate a correlation id for a range request
pub fn generate_request_id() -> Arc<str> {
    uuid::Uuid::new_v4().to_string().into()
}
