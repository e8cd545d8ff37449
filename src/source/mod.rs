//! Source Layer
//!
//! Abstraction over the remote paginated backend and the async plumbing
//! that carries fetch completions back to controller state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       SourceHub                              │
//! │  ┌──────────────────┐        ┌─────────────────────────┐    │
//! │  │   RangeSource    │        │     tokio runtime       │    │
//! │  │ (REST / memory)  │        │  (detached fetch tasks) │    │
//! │  └──────────────────┘        └─────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ FetchEvent
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Controller state                          │
//! │            (GridController, TreeController, ...)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod events;
mod hub;
mod range_source;
mod rest;
mod runtime;

pub use events::*;
pub use hub::*;
pub use range_source::*;
pub use rest::*;
pub use runtime::*;
