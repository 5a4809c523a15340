//! Canonical endpoint paths of the detection backend.
//!
//! Every URL the client calls is built through [`Endpoints`], so the two
//! backend generations are described in exactly one place.
//!
//! # Path layout
//!
//! ```text
//!                    versioned            legacy
//! health             GET  /health         GET  /health
//! text detection     POST /detect/text    POST /detect_fake
//! image detection    POST /detect/image   POST /detect_fake_from_image
//! OCR probe          POST /test_google_ocr (both)
//! ```

use std::fmt;
use std::str::FromStr;

use karipap_models::{DetectionTab, InputMode, LEGACY_MAX_IMAGE_BYTES, VERSIONED_MAX_IMAGE_BYTES};
use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// Origin used when nothing else is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

// ---------------------------------------------------------------------------
// BackendContract
// ---------------------------------------------------------------------------

/// Which generation of the backend API to speak.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendContract {
    /// `detect/text` + `detect/image`, nested result sections, clickbait.
    #[default]
    Versioned,
    /// `detect_fake` + `detect_fake_from_image`, flat results, no clickbait.
    Legacy,
}

impl BackendContract {
    /// Image ceiling the front end of this generation enforced.
    pub fn default_max_image_bytes(self) -> u64 {
        match self {
            BackendContract::Versioned => VERSIONED_MAX_IMAGE_BYTES,
            BackendContract::Legacy => LEGACY_MAX_IMAGE_BYTES,
        }
    }

    /// Whether this generation can score clickbait.
    pub fn supports(self, tab: DetectionTab) -> bool {
        match (self, tab) {
            (_, DetectionTab::FakeNews)
            | (BackendContract::Versioned, DetectionTab::Clickbait) => true,
            (BackendContract::Legacy, DetectionTab::Clickbait) => false,
        }
    }

    /// Value of the `input_type` body field; only the legacy backend wants it.
    pub fn input_type_field(self, mode: InputMode) -> Option<&'static str> {
        match (self, mode) {
            (BackendContract::Versioned, _) => None,
            (BackendContract::Legacy, InputMode::Text) => Some("text"),
            (BackendContract::Legacy, InputMode::Image) => Some("image"),
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Fully-qualified endpoint URLs for one backend origin.
///
/// # Examples
///
/// ```
/// use karipap_sdk::{BackendContract, Endpoints};
///
/// let ep = Endpoints::new("http://localhost:8000/", BackendContract::Versioned).unwrap();
/// assert_eq!(ep.health(), "http://localhost:8000/health");
/// assert_eq!(ep.detect_text(), "http://localhost:8000/detect/text");
///
/// let legacy = Endpoints::new("http://localhost:8000", BackendContract::Legacy).unwrap();
/// assert_eq!(legacy.detect_image(), "http://localhost:8000/detect_fake_from_image");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    origin: String,
    contract: BackendContract,
}

impl Endpoints {
    /// Validate `origin` and fix the contract.
    ///
    /// The origin must be an absolute `http` or `https` URL. A trailing
    /// slash is ignored.
    pub fn new(origin: &str, contract: BackendContract) -> Result<Self, SdkError> {
        let url = reqwest::Url::parse(origin)
            .map_err(|e| SdkError::Config(format!("invalid backend URL \"{origin}\": {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SdkError::Config(format!(
                "backend URL must be http or https, got \"{}\"",
                url.scheme()
            )));
        }
        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
            contract,
        })
    }

    /// The backend origin, without trailing slash.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The contract these paths belong to.
    pub fn contract(&self) -> BackendContract {
        self.contract
    }

    /// `GET` health probe.
    pub fn health(&self) -> String {
        self.url("health")
    }

    /// `POST` text detection.
    pub fn detect_text(&self) -> String {
        match self.contract {
            BackendContract::Versioned => self.url("detect/text"),
            BackendContract::Legacy => self.url("detect_fake"),
        }
    }

    /// `POST` image detection.
    pub fn detect_image(&self) -> String {
        match self.contract {
            BackendContract::Versioned => self.url("detect/image"),
            BackendContract::Legacy => self.url("detect_fake_from_image"),
        }
    }

    /// Detection endpoint for the given input kind.
    pub fn detect(&self, mode: InputMode) -> String {
        match mode {
            InputMode::Text => self.detect_text(),
            InputMode::Image => self.detect_image(),
        }
    }

    /// `POST` OCR-only probe.
    pub fn test_ocr(&self) -> String {
        self.url("test_google_ocr")
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.origin)
    }
}

impl fmt::Display for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.origin, self.contract)
    }
}

impl FromStr for Endpoints {
    type Err = SdkError;

    /// Parse an origin with the default contract.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s, BackendContract::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn versioned() -> Endpoints {
        Endpoints::new(DEFAULT_ORIGIN, BackendContract::Versioned).unwrap()
    }

    fn legacy() -> Endpoints {
        Endpoints::new(DEFAULT_ORIGIN, BackendContract::Legacy).unwrap()
    }

    // -- paths --------------------------------------------------------------

    #[test]
    fn versioned_paths() {
        let ep = versioned();
        assert_eq!(ep.health(), "http://localhost:8000/health");
        assert_eq!(ep.detect_text(), "http://localhost:8000/detect/text");
        assert_eq!(ep.detect_image(), "http://localhost:8000/detect/image");
        assert_eq!(ep.test_ocr(), "http://localhost:8000/test_google_ocr");
    }

    #[test]
    fn legacy_paths() {
        let ep = legacy();
        assert_eq!(ep.detect(InputMode::Text), "http://localhost:8000/detect_fake");
        assert_eq!(ep.detect(InputMode::Image), "http://localhost:8000/detect_fake_from_image");
        assert_eq!(ep.health(), "http://localhost:8000/health");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let ep = Endpoints::new("http://10.0.0.5:9000/", BackendContract::Versioned).unwrap();
        assert_eq!(ep.origin(), "http://10.0.0.5:9000");
        assert_eq!(ep.health(), "http://10.0.0.5:9000/health");
    }

    // -- validation ---------------------------------------------------------

    #[test]
    fn rejects_relative_and_non_http_origins() {
        assert!(matches!(
            Endpoints::new("localhost:8000/api", BackendContract::Versioned),
            Err(SdkError::Config(_))
        ));
        assert!(matches!(
            Endpoints::new("ftp://example.com", BackendContract::Versioned),
            Err(SdkError::Config(_))
        ));
        assert!("not a url".parse::<Endpoints>().is_err());
    }

    // -- contract -----------------------------------------------------------

    #[test]
    fn contract_limits_and_support() {
        assert_eq!(BackendContract::Versioned.default_max_image_bytes(), 10 * 1024 * 1024);
        assert_eq!(BackendContract::Legacy.default_max_image_bytes(), 5 * 1024 * 1024);
        assert!(BackendContract::Versioned.supports(DetectionTab::Clickbait));
        assert!(!BackendContract::Legacy.supports(DetectionTab::Clickbait));
        assert!(BackendContract::Legacy.supports(DetectionTab::FakeNews));
    }

    #[test]
    fn contract_input_type_field() {
        assert_eq!(BackendContract::Versioned.input_type_field(InputMode::Text), None);
        assert_eq!(BackendContract::Legacy.input_type_field(InputMode::Image), Some("image"));
    }

    #[test]
    fn contract_parses_lowercase() {
        assert_eq!("legacy".parse::<BackendContract>().unwrap(), BackendContract::Legacy);
        assert_eq!(BackendContract::Versioned.to_string(), "versioned");
    }
}
