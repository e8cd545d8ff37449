//! Logging Setup
//!
//! Tracing initialization for host applications embedding the data-view
//! controllers. Library code only emits `tracing` events; installing a
//! subscriber stays the host's decision.

/// Initialize a formatted tracing subscriber with env-filter support.
///
/// Honors `RUST_LOG`; falls back to INFO when unset. Calling this twice
/// returns an error from the subscriber, which is logged and ignored so a
/// host that already installed its own subscriber keeps it.
pub fn init() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed, keeping existing one");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init(); // second call must not panic
    }
}
