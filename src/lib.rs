//! Fleetview Data-View Library
//!
//! Headless controllers for the data-heavy screens of a fleet management
//! dashboard: server-side paginated grids, lazy-loading group trees, and
//! virtualized card galleries, all fed by a REST backend. Rendering is the
//! host application's job; this crate owns the caching, fetch coordination,
//! and overlay state behind those screens.

pub mod config;
pub mod constants;
pub mod dataview;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod logging;
pub mod source;
pub mod utils;

pub use error::{Error, Result};
