//! Backend health, polled once at startup.
//!
//! The result is advisory: it colours a status dot in the header and never
//! gates a request.

use serde::{Deserialize, Serialize};

/// Whether the backend answered its health probe.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum HealthStatus {
    /// The backend reported `"healthy"`.
    Healthy,
    /// The probe failed, or the backend reported anything else.
    Unavailable,
}

/// Health snapshot of the detection backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BackendHealth {
    /// Overall status.
    pub status: HealthStatus,
    /// State of the OCR (vision) API as reported by the backend.
    pub vision_api: Option<String>,
}

impl BackendHealth {
    /// Snapshot for a backend that could not be reached.
    pub fn unavailable() -> Self {
        Self {
            status: HealthStatus::Unavailable,
            vision_api: None,
        }
    }

    /// True if the backend reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
