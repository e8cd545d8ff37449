//! Utils - Local Persistence Helpers

pub mod config_store;
