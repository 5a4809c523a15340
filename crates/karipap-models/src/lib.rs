#![deny(missing_docs)]

//! # Karipap Models
//!
//! Core data types for the Karipap fake news / clickbait detection client.
//!
//! ## Request / result flow
//!
//! ```text
//! DetectionTab + PendingInput ──► DetectionRequest ──► (backend)
//!                                                         │
//!                 DetectionResponse (wire, lenient) ◄─────┘
//!                         │ into_outcome(tab)
//!                         ▼
//! DetectionOutcome { input_type, processing_time, ocr, received_at,
//!                    result: DetectionResult::FakeNews | Clickbait | Error,
//!                    secondary: the other tab's section, if also present }
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`mode`] | `InputMode`, `DetectionTab` |
//! | [`input`] | Image validation, preview and base64 payload, `PendingInput` |
//! | [`request`] | `DetectionRequest` |
//! | [`result`] | `Percent`, verdicts, `DetectionResult`, `DetectionOutcome` |
//! | [`ocr`] | OCR sentinels and extracts |
//! | [`health`] | `BackendHealth` |
//! | [`wire`] | JSON bodies of both backend generations |

pub mod error;
pub mod health;
pub mod input;
pub mod mode;
pub mod ocr;
pub mod request;
pub mod result;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use error::*;
pub use health::*;
pub use input::*;
pub use mode::*;
pub use ocr::*;
pub use request::*;
pub use result::*;
pub use wire::*;
