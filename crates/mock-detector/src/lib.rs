//! Mock of the Karipap detection backend.
//!
//! One router answers both API generations:
//!
//! | Route                          | Generation | Body              |
//! |--------------------------------|------------|-------------------|
//! | `GET  /health`                 | both       |                   |
//! | `POST /detect/text`            | versioned  | `{text}`          |
//! | `POST /detect/image`           | versioned  | `{image}`         |
//! | `POST /detect_fake`            | legacy     | `{text, input_type}`  |
//! | `POST /detect_fake_from_image` | legacy     | `{image, input_type}` |
//! | `POST /test_google_ocr`        | legacy     | `{image}`         |
//!
//! Verdicts come from [`heuristics`]; OCR is the longest printable run in
//! the image bytes.

pub mod config;
pub mod heuristics;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Json, State};
use axum::routing::{get, post};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

pub use config::MockConfig;
use heuristics::{ClickbaitVerdict, FakeVerdict, NO_TEXT_SENTINEL};

type SharedConfig = Arc<MockConfig>;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body of the text detection routes.
#[derive(Deserialize)]
struct TextItem {
    text: String,
}

/// Body of the image routes.
#[derive(Deserialize)]
struct ImageItem {
    image: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// All routes, bound to `config`.
pub fn router(config: MockConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/detect/text", post(detect_text))
        .route("/detect/image", post(detect_image))
        .route("/detect_fake", post(detect_fake))
        .route("/detect_fake_from_image", post(detect_fake_from_image))
        .route("/test_google_ocr", post(test_ocr))
        .with_state(Arc::new(config))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn fake_json(v: &FakeVerdict) -> Value {
    json!({
        "prediction": v.prediction,
        "confidence": v.confidence,
        "explanation": v.explanation,
        "key_points": v.key_points,
    })
}

fn clickbait_json(v: &ClickbaitVerdict) -> Value {
    json!({
        "score": v.score,
        "prediction": v.prediction,
        "explanation": v.explanation,
        "clickbait_elements": v.clickbait_elements,
    })
}

fn error_verdict(explanation: &str) -> FakeVerdict {
    FakeVerdict {
        prediction: "Error",
        confidence: 0,
        explanation: explanation.to_string(),
        key_points: Vec::new(),
    }
}

/// What the fake OCR made of an image.
enum Ocr {
    Invalid,
    NoText,
    Text(String),
}

fn run_ocr(image: &str) -> Ocr {
    match STANDARD.decode(image.trim()) {
        Err(_) => Ocr::Invalid,
        Ok(bytes) => match heuristics::extract_text(&bytes) {
            text if text == NO_TEXT_SENTINEL => Ocr::NoText,
            text => Ocr::Text(text),
        },
    }
}

async fn pause(config: &MockConfig) {
    if !config.delay.is_zero() {
        tokio::time::sleep(config.delay).await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health`.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "google_vision_api": "mock",
        "message": "mock detector running",
    }))
}

/// `POST /detect/text`: versioned, both sections.
async fn detect_text(
    State(config): State<SharedConfig>,
    Json(item): Json<TextItem>,
) -> Json<Value> {
    let started = Instant::now();
    info!(chars = item.text.chars().count(), "text detection (versioned)");
    pause(&config).await;

    let fake = heuristics::score_fake(&item.text);
    let clickbait = heuristics::score_clickbait(&item.text);

    Json(json!({
        "input_type": "text",
        "processing_time": started.elapsed().as_secs_f64(),
        "fake_news": fake_json(&fake),
        "clickbait": clickbait_json(&clickbait),
    }))
}

/// `POST /detect/image`: versioned, OCR then fake news only.
async fn detect_image(
    State(config): State<SharedConfig>,
    Json(item): Json<ImageItem>,
) -> Json<Value> {
    let started = Instant::now();
    info!(payload_len = item.image.len(), "image detection (versioned)");
    pause(&config).await;

    let (ocr_text, ocr_length, verdict) = match run_ocr(&item.image) {
        Ocr::Invalid => (None, None, error_verdict("Invalid image data")),
        Ocr::NoText => (
            Some(NO_TEXT_SENTINEL.to_string()),
            None,
            FakeVerdict {
                prediction: "Unknown",
                confidence: 0,
                explanation: "No text found in the image, cannot judge".into(),
                key_points: Vec::new(),
            },
        ),
        Ocr::Text(text) => {
            let verdict = heuristics::score_fake(&text);
            (Some(heuristics::truncate_echo(&text)), Some(text.chars().count()), verdict)
        }
    };

    Json(json!({
        "input_type": "image",
        "processing_time": started.elapsed().as_secs_f64(),
        "ocr_text": ocr_text,
        "ocr_length": ocr_length,
        "fake_news": fake_json(&verdict),
    }))
}

/// `POST /detect_fake`: legacy, flat verdict.
async fn detect_fake(
    State(config): State<SharedConfig>,
    Json(item): Json<TextItem>,
) -> Json<Value> {
    info!(chars = item.text.chars().count(), "text detection (legacy)");
    pause(&config).await;

    let mut body = fake_json(&heuristics::score_fake(&item.text));
    body["input_type"] = json!("text");
    Json(body)
}

/// `POST /detect_fake_from_image`: legacy, flat verdict.
async fn detect_fake_from_image(
    State(config): State<SharedConfig>,
    Json(item): Json<ImageItem>,
) -> Json<Value> {
    info!(payload_len = item.image.len(), "image detection (legacy)");
    pause(&config).await;

    let mut body = match run_ocr(&item.image) {
        Ocr::Invalid => fake_json(&error_verdict("Invalid image data")),
        Ocr::NoText => {
            let mut body = fake_json(&FakeVerdict {
                prediction: "Unknown",
                confidence: 0,
                explanation: "No text found in the image, cannot judge".into(),
                key_points: Vec::new(),
            });
            body["ocr_text"] = json!(NO_TEXT_SENTINEL);
            body
        }
        Ocr::Text(text) => {
            let mut body = fake_json(&heuristics::score_fake(&text));
            body["ocr_text"] = json!(heuristics::truncate_echo(&text));
            body["ocr_length"] = json!(text.chars().count());
            body
        }
    };
    body["input_type"] = json!("image");
    Json(body)
}

/// `POST /test_google_ocr`: OCR only.
async fn test_ocr(State(config): State<SharedConfig>, Json(item): Json<ImageItem>) -> Json<Value> {
    info!(payload_len = item.image.len(), "OCR probe");
    pause(&config).await;

    match run_ocr(&item.image) {
        Ocr::Invalid => Json(json!({ "success": false, "error": "Invalid image data" })),
        Ocr::NoText => Json(json!({
            "success": true,
            "ocr_result": NO_TEXT_SENTINEL,
            "length": NO_TEXT_SENTINEL.chars().count(),
        })),
        Ocr::Text(text) => Json(json!({
            "success": true,
            "length": text.chars().count(),
            "ocr_result": text,
        })),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
