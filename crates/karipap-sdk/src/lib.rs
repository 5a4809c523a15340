//! # Karipap SDK
//!
//! HTTP client for the **Karipap** fake news / clickbait detection
//! backend.
//!
//! The SDK provides:
//!
//! * [`DetectorClient`]: issues health probes, detection requests and
//!   OCR probes, and decodes the answers into [`karipap_models`] types.
//! * [`Endpoints`]: canonical endpoint URLs for both backend
//!   generations, selected by [`BackendContract`].
//! * [`SdkError`]: unified error type for all SDK operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use karipap_models::{DetectionRequest, DetectionTab};
//! use karipap_sdk::{BackendContract, DetectorClient};
//!
//! # async fn run() -> Result<(), karipap_sdk::SdkError> {
//! let client = DetectorClient::connect("http://localhost:8000", BackendContract::Versioned)?;
//! let request = DetectionRequest::text(DetectionTab::Clickbait, "You won't believe this")?;
//! let outcome = client.detect_or_error(&request).await;
//! println!("{:?}", outcome.result);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;

pub use client::DetectorClient;
pub use endpoints::{BackendContract, Endpoints, DEFAULT_ORIGIN};
pub use error::SdkError;
