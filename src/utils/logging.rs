// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a human-readable console subscriber.
/// `RUST_LOG` overrides the level; without it, progress messages (INFO) are shown.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("Logging setup complete.");
}
