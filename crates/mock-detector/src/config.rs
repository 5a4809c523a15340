//! Mock detector configuration.
//!
//! Built from environment variables at startup and injected into the Axum
//! handlers through [`axum::extract::State`].

use std::time::Duration;

/// Settings shared by all handlers.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Port to listen on (default `8000`).
    pub listen_port: u16,
    /// Artificial latency added to every detection, to make the
    /// in-flight state visible in the TUI.
    pub delay: Duration,
}

impl MockConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                   | Default | Description                  |
    /// |----------------------------|---------|------------------------------|
    /// | `MOCK_DETECTOR_PORT`       | `8000`  | HTTP listen port             |
    /// | `MOCK_DETECTOR_DELAY_MS`   | `0`     | Latency per detection (ms)   |
    pub fn from_env() -> Self {
        let listen_port: u16 = std::env::var("MOCK_DETECTOR_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8000);

        let delay_ms: u64 = std::env::var("MOCK_DETECTOR_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        Self {
            listen_port,
            delay: Duration::from_millis(delay_ms),
        }
    }
}
