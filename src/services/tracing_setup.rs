//! Tracing subscriber setup
//!
//! Shared tracing configuration used by the CLI and by tests.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber, logging to `log_file_path`.
///
/// Filtering follows RUST_LOG with an INFO default.
pub fn init_global(log_file_path: &Path) -> io::Result<()> {
    let log_file = File::create(log_file_path)?;
    build_subscriber(log_file).init();
    Ok(())
}

/// Build a subscriber writing plain-text events to `log_file`.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_subscriber_writes_to_log_file() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log_file.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("Test warning message");
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(contents.contains("WARN"), "Log should contain WARN level");
        assert!(
            contents.contains("Test warning message"),
            "Log should contain message"
        );
    }

    #[test]
    fn test_trace_is_filtered_by_default() {
        // Only meaningful when RUST_LOG doesn't lower the level
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log_file.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::trace!("noisy trace message");
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(!contents.contains("noisy trace message"));
    }
}
