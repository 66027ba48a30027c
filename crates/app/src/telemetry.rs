//! Tracing setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Filter defaults to `agekit=debug` and is overridable via `RUST_LOG`.
/// Safe to call when the embedding shell already installed a subscriber;
/// the second installation is simply skipped.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agekit=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
