// Structured Logging
// tracing-based setup, initialized once for the whole process.

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Setup structured logging for the entire application.
///
/// Level defaults to INFO and can be raised via RUST_LOG.
pub fn setup_logging(log_level: Option<&str>) {
    let level = match log_level.unwrap_or("INFO").to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    };

    INIT.call_once(|| {
        let filter = EnvFilter::from_default_env()
            .add_directive(level.into())
            // Suppress noisy transport libraries
            .add_directive("tokio_tungstenite=warn".parse().unwrap())
            .add_directive("tungstenite=warn".parse().unwrap());

        tracing_subscriber::fmt()
            .with_target(true)
            .with_env_filter(filter)
            .init();

        tracing::info!(level = %level, "Logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_is_idempotent() {
        setup_logging(Some("DEBUG"));
        setup_logging(None);
    }
}
