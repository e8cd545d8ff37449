//! Tokio Runtime Bridge
//!
//! Host UI frameworks run their own cooperative executors, while the REST
//! client requires tokio. This module provides a shared runtime to spawn
//! fetches on without blocking the host's event loop.

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create tokio runtime"))
}

/// Spawn a detached task in the tokio runtime
///
/// Used for fire-and-forget range fetches; the result travels back over a
/// channel rather than being awaited.
pub fn spawn_in_tokio<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    get_runtime().spawn(future);
}

/// Block on a future synchronously (use sparingly, mainly for initialization)
///
/// **Warning**: This blocks the current thread.
pub fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    get_runtime().block_on(future)
}
