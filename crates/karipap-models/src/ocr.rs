//! OCR text returned by the backend.
//!
//! The backend does not signal OCR failure structurally: it returns the
//! failure as the OCR text itself, prefixed with a fixed marker.  Those
//! sentinels are recognised here so that they are never shown as if they
//! were extracted text.

use serde::{Deserialize, Serialize};

/// Prefixes the backend puts in front of an OCR failure message.
pub const OCR_FAILURE_PREFIXES: &[&str] =
    &["OCR失败", "OCR处理失败", "OCR识别失败", "OCR failed"];

/// Text the backend returns when the image contains no text.
pub const OCR_NO_TEXT_SENTINELS: &[&str] =
    &["未在图片中检测到文字", "No text detected in image"];

/// How an OCR text should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum OcrReading {
    /// Real text was extracted.
    Extracted,
    /// The image contained no text.
    NoText,
    /// OCR failed; the text is the failure message.
    Failed,
}

impl OcrReading {
    /// Classify an OCR text against the known sentinels.
    ///
    /// # Examples
    ///
    /// ```
    /// use karipap_models::OcrReading;
    ///
    /// assert_eq!(OcrReading::classify("Breaking news"), OcrReading::Extracted);
    /// assert_eq!(OcrReading::classify("OCR失败: quota"), OcrReading::Failed);
    /// assert_eq!(OcrReading::classify("未在图片中检测到文字"), OcrReading::NoText);
    /// ```
    pub fn classify(text: &str) -> Self {
        let trimmed = text.trim();
        if OCR_FAILURE_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
            OcrReading::Failed
        } else if trimmed.is_empty() || OCR_NO_TEXT_SENTINELS.contains(&trimmed) {
            OcrReading::NoText
        } else {
            OcrReading::Extracted
        }
    }
}

/// OCR text attached to an image detection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OcrExtract {
    /// Text as returned; the backend truncates long extracts.
    pub text: String,
    /// Character count before truncation, when reported.
    pub length: Option<usize>,
}

impl OcrExtract {
    /// Classification of [`Self::text`].
    pub fn reading(&self) -> OcrReading {
        OcrReading::classify(&self.text)
    }

    /// Character count to display: the backend's count, or the length of
    /// the text received.
    pub fn char_count(&self) -> usize {
        self.length.unwrap_or_else(|| self.text.chars().count())
    }

    /// The text, if it is a real extract rather than a sentinel.
    pub fn displayable(&self) -> Option<&str> {
        (self.reading() == OcrReading::Extracted).then_some(self.text.as_str())
    }
}

/// Result of the OCR-only probe endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OcrProbe {
    /// Whether the backend considers the probe successful.
    pub success: bool,
    /// Extracted text or failure message.
    pub text: String,
    /// Character count reported by the backend.
    pub length: usize,
}
