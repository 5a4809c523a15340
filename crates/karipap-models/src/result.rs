//! Detection results as the client understands them.
//!
//! The backend answers with loosely-typed JSON (see [`crate::wire`]).  It is
//! decoded into the tagged [`DetectionResult`] and wrapped in a
//! [`DetectionOutcome`] that also carries the context the result header
//! needs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mode::InputMode;
use crate::ocr::OcrExtract;

// ---------------------------------------------------------------------------
// Percent
// ---------------------------------------------------------------------------

/// An integer percentage in `0..=100`.
///
/// # Examples
///
/// ```
/// use karipap_models::Percent;
///
/// assert_eq!(Percent::from_f64(92.4).value(), 92);
/// assert_eq!(Percent::from_f64(140.0).value(), 100);
/// assert_eq!(Percent::from_f64(-3.0).value(), 0);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(u8);

impl Percent {
    /// Zero percent.
    pub const ZERO: Percent = Percent(0);

    /// Round and clamp a float into `0..=100`. NaN maps to zero.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        // Clamped first, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = value.clamp(0.0, 100.0).round() as u8;
        Self(v)
    }

    /// Interpret a JSON value leniently: numbers and numeric strings are
    /// accepted, anything else is zero.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::ZERO, Self::from_f64),
            serde_json::Value::String(s) => s
                .trim()
                .trim_end_matches('%')
                .parse::<f64>()
                .map_or(Self::ZERO, Self::from_f64),
            _ => Self::ZERO,
        }
    }

    /// The percentage as an integer.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Percent {
    fn from(v: u8) -> Self {
        Self(v.min(100))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// ---------------------------------------------------------------------------
// Fake news
// ---------------------------------------------------------------------------

/// Fake news verdict codes.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
pub enum FakeNewsPrediction {
    /// The backend judged the content fake.
    Fake,
    /// The backend judged the content genuine.
    NotFake,
    /// The backend could not decide.
    Unknown,
    /// The backend failed while deciding.
    Error,
}

impl FakeNewsPrediction {
    /// Map a backend prediction string to a code.
    ///
    /// The legacy backend also emits the Chinese spellings `未知` and `错误`.
    /// Unrecognised strings are treated as undecided.
    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "Fake" => FakeNewsPrediction::Fake,
            "Not Fake" | "NotFake" => FakeNewsPrediction::NotFake,
            "Error" | "错误" => FakeNewsPrediction::Error,
            _ => FakeNewsPrediction::Unknown,
        }
    }
}

/// Fake news classification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FakeNewsResult {
    /// Verdict.
    pub prediction: FakeNewsPrediction,
    /// Backend-reported certainty.
    pub confidence: Percent,
    /// Free-text reasoning, possibly empty.
    pub explanation: String,
    /// Ordered list of decisive observations.
    pub key_points: Vec<String>,
}

// ---------------------------------------------------------------------------
// Clickbait
// ---------------------------------------------------------------------------

/// Clickbait verdict codes.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
pub enum ClickbaitPrediction {
    /// The headline is clickbait.
    Clickbait,
    /// The headline is not clickbait.
    NotClickbait,
}

impl ClickbaitPrediction {
    /// Anything but the exact string `"Clickbait"` counts as not clickbait.
    pub fn from_wire(value: &str) -> Self {
        if value.trim() == "Clickbait" {
            ClickbaitPrediction::Clickbait
        } else {
            ClickbaitPrediction::NotClickbait
        }
    }
}

/// Clickbait scoring.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClickbaitResult {
    /// How clickbait-y the text is.
    pub score: Percent,
    /// Verdict.
    pub prediction: ClickbaitPrediction,
    /// Free-text reasoning, possibly empty.
    pub explanation: String,
    /// Ordered list of clickbait techniques found.
    pub clickbait_elements: Vec<String>,
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A request that failed before a verdict could be read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResult {
    /// The caught error's message.
    pub message: String,
}

// ---------------------------------------------------------------------------
// DetectionResult / DetectionOutcome
// ---------------------------------------------------------------------------

/// What a detection request produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionResult {
    /// A fake news verdict.
    FakeNews(FakeNewsResult),
    /// A clickbait verdict.
    Clickbait(ClickbaitResult),
    /// Transport, status or decoding failure.
    Error(ErrorResult),
}

impl DetectionResult {
    /// Build an error result from anything displayable.
    pub fn error(message: impl fmt::Display) -> Self {
        DetectionResult::Error(ErrorResult {
            message: message.to_string(),
        })
    }

    /// True for [`DetectionResult::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, DetectionResult::Error(_))
    }
}

/// A result plus the context shown around it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetectionOutcome {
    /// Kind of input the backend says it processed.
    pub input_type: InputMode,
    /// Backend processing time in seconds, when reported.
    pub processing_time: Option<f64>,
    /// Text the backend extracted from an image.
    pub ocr: Option<OcrExtract>,
    /// The verdict or failure.
    pub result: DetectionResult,
    /// The other tab's verdict, when the backend answered both at once.
    #[serde(default)]
    pub secondary: Option<DetectionResult>,
    /// When the client received the response.
    pub received_at: DateTime<Utc>,
}

impl DetectionOutcome {
    /// Wrap a failure with no backend context.
    pub fn failed(input_type: InputMode, message: impl fmt::Display) -> Self {
        Self {
            input_type,
            processing_time: None,
            ocr: None,
            result: DetectionResult::error(message),
            secondary: None,
            received_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
