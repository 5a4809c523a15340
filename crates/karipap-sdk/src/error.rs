//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK.  It wraps transport, status, serialization and
//! decoding failures into a unified enum.  Its `Display` output is what the
//! user sees inside an error result, so the messages are kept short.

use karipap_models::ModelError;

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. bad URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure: connection refused, reset, timeout.
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for logging.
        body: String,
    },

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The body was valid JSON but not a usable detection payload.
    #[error("invalid response: {0}")]
    Decode(#[from] ModelError),
}

impl SdkError {
    /// True if the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, SdkError::Http(_))
    }
}
