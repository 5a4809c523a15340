//! JSON shapes exchanged with the detection backend.
//!
//! Two generations of the backend exist.  The versioned one nests each
//! verdict in its own section:
//!
//! ```text
//! { "input_type": "text", "processing_time": 1.8,
//!   "fake_news": { "prediction": "Fake", "confidence": 92, ... },
//!   "clickbait": { "score": 74, "prediction": "Clickbait", ... } }
//! ```
//!
//! The legacy one returns a single flat fake-news verdict:
//!
//! ```text
//! { "input_type": "image", "ocr_text": "...", "ocr_length": 412,
//!   "prediction": "Not Fake", "confidence": 81, "explanation": "...", "key_points": [...] }
//! ```
//!
//! Both are decoded by [`DetectionResponse`], which is deliberately lenient:
//! every field is optional and numbers may arrive as strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelError;
use crate::health::{BackendHealth, HealthStatus};
use crate::mode::{DetectionTab, InputMode};
use crate::ocr::{OcrExtract, OcrProbe, OcrReading};
use crate::result::{
    ClickbaitPrediction, ClickbaitResult, DetectionOutcome, DetectionResult, FakeNewsPrediction,
    FakeNewsResult, Percent,
};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of the text detection endpoints.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TextBody<'a> {
    /// Text to classify.
    pub text: &'a str,
    /// Only sent to the legacy backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<&'static str>,
}

/// Body of the image detection and OCR probe endpoints.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageBody<'a> {
    /// Base64 image, no data-URL prefix.
    pub image: &'a str,
    /// Only sent to the legacy backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<&'static str>,
}

// ---------------------------------------------------------------------------
// Detection response
// ---------------------------------------------------------------------------

/// Fake news section, nested (versioned) or flattened (legacy).
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FakeNewsSection {
    /// Verdict string.
    #[serde(default)]
    pub prediction: Option<String>,
    /// Certainty, number or numeric string.
    #[serde(default)]
    pub confidence: Value,
    /// Reasoning.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Decisive observations.
    #[serde(default)]
    pub key_points: Option<Vec<Value>>,
}

impl From<FakeNewsSection> for FakeNewsResult {
    fn from(s: FakeNewsSection) -> Self {
        Self {
            prediction: s
                .prediction
                .as_deref()
                .map_or(FakeNewsPrediction::Unknown, FakeNewsPrediction::from_wire),
            confidence: Percent::from_json(&s.confidence),
            explanation: s.explanation.unwrap_or_default(),
            key_points: string_list(s.key_points),
        }
    }
}

/// Clickbait section of the versioned response.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ClickbaitSection {
    /// Score, number or numeric string.
    #[serde(default)]
    pub score: Value,
    /// Verdict string.
    #[serde(default)]
    pub prediction: Option<String>,
    /// Reasoning.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Techniques found.
    #[serde(default)]
    pub clickbait_elements: Option<Vec<Value>>,
}

impl From<ClickbaitSection> for ClickbaitResult {
    fn from(s: ClickbaitSection) -> Self {
        Self {
            score: Percent::from_json(&s.score),
            prediction: s
                .prediction
                .as_deref()
                .map_or(ClickbaitPrediction::NotClickbait, ClickbaitPrediction::from_wire),
            explanation: s.explanation.unwrap_or_default(),
            clickbait_elements: string_list(s.clickbait_elements),
        }
    }
}

/// Any detection payload, versioned or legacy.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DetectionResponse {
    /// `"text"` or `"image"`.
    #[serde(default)]
    pub input_type: Option<String>,
    /// Seconds spent by the backend.
    #[serde(default)]
    pub processing_time: Value,
    /// OCR text for image inputs (possibly a failure sentinel).
    #[serde(default)]
    pub ocr_text: Option<String>,
    /// Untruncated OCR length.
    #[serde(default)]
    pub ocr_length: Option<usize>,
    /// Versioned fake news section.
    #[serde(default)]
    pub fake_news: Option<FakeNewsSection>,
    /// Versioned clickbait section.
    #[serde(default)]
    pub clickbait: Option<ClickbaitSection>,

    /// Legacy flat verdict.
    #[serde(default)]
    pub prediction: Option<String>,
    /// Legacy flat certainty.
    #[serde(default)]
    pub confidence: Value,
    /// Legacy flat reasoning.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Legacy flat observations.
    #[serde(default)]
    pub key_points: Option<Vec<Value>>,
}

impl DetectionResponse {
    /// Decode into an outcome for a request made on `tab` with `requested`
    /// input.
    ///
    /// The section matching `tab` becomes the result and the other one, if
    /// present, is kept as `secondary`. If only the other section is present
    /// it is used instead.  A payload with no section at all is an error.
    pub fn into_outcome(
        self,
        tab: DetectionTab,
        requested: InputMode,
        received_at: DateTime<Utc>,
    ) -> Result<DetectionOutcome, ModelError> {
        let legacy = self.prediction.clone().map(|prediction| FakeNewsSection {
            prediction: Some(prediction),
            confidence: self.confidence.clone(),
            explanation: self.explanation.clone(),
            key_points: self.key_points.clone(),
        });

        let fake_news = self
            .fake_news
            .or(legacy)
            .map(|s| DetectionResult::FakeNews(s.into()));
        let clickbait = self.clickbait.map(|s| DetectionResult::Clickbait(s.into()));

        let (primary, other) = match tab {
            DetectionTab::FakeNews => (fake_news, clickbait),
            DetectionTab::Clickbait => (clickbait, fake_news),
        };
        let (result, secondary) = match (primary, other) {
            (Some(primary), other) => (primary, other),
            (None, Some(other)) => (other, None),
            (None, None) => return Err(ModelError::MissingDetection),
        };

        let input_type = match self.input_type.as_deref() {
            Some(kind) => InputMode::from_wire(Some(kind)),
            None => requested,
        };

        Ok(DetectionOutcome {
            input_type,
            processing_time: self.processing_time.as_f64(),
            ocr: self.ocr_text.map(|text| OcrExtract {
                text,
                length: self.ocr_length,
            }),
            result,
            secondary,
            received_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Body of `GET /health`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    /// `"healthy"` when all is well.
    pub status: String,
    /// Vision API state; the legacy backend calls it `vision_api`.
    #[serde(default, alias = "vision_api")]
    pub google_vision_api: Option<String>,
}

impl From<HealthResponse> for BackendHealth {
    fn from(r: HealthResponse) -> Self {
        let status = if r.status.eq_ignore_ascii_case("healthy") {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unavailable
        };
        Self {
            status,
            vision_api: r.google_vision_api,
        }
    }
}

// ---------------------------------------------------------------------------
// OCR probe
// ---------------------------------------------------------------------------

/// Body returned by the OCR probe endpoint.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct OcrProbeResponse {
    /// Backend's own success flag, when present.
    #[serde(default)]
    pub success: Option<bool>,
    /// Extracted text or failure message.
    #[serde(default)]
    pub ocr_result: Option<String>,
    /// Character count.
    #[serde(default)]
    pub length: Option<usize>,
    /// Error message for invalid input.
    #[serde(default)]
    pub error: Option<String>,
}

impl From<OcrProbeResponse> for OcrProbe {
    fn from(r: OcrProbeResponse) -> Self {
        match r.ocr_result {
            Some(text) => {
                let success =
                    r.success.unwrap_or(true) && OcrReading::classify(&text) != OcrReading::Failed;
                let length = r.length.unwrap_or_else(|| text.chars().count());
                Self {
                    success,
                    text,
                    length,
                }
            }
            None => Self {
                success: false,
                text: r.error.unwrap_or_default(),
                length: 0,
            },
        }
    }
}

fn string_list(values: Option<Vec<Value>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
