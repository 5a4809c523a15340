//! Stand-alone mock of the detection backend.
//!
//! Serves both API generations on one port so the client can be exercised
//! without the real OCR and language-model services.

use mock_detector::{router, MockConfig};
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = MockConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.listen_port);
    info!(delay_ms = config.delay.as_millis(), "artificial latency");

    let app = router(config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "mock detector listening");
    axum::serve(listener, app).await
}
