//! Deterministic keyword scoring used in place of a real model.
//!
//! The numbers mean nothing; they only need to be stable so that demos and
//! tests see the same verdict for the same text.

/// Phrases that push a text towards "Fake".
const FAKE_MARKERS: &[&str] = &[
    "miracle",
    "cure",
    "hoax",
    "secret",
    "they don't want you to know",
    "100%",
    "sky is green",
    "flat earth",
    "shocking",
];

/// Phrases that push a headline towards "Clickbait".
const CLICKBAIT_MARKERS: &[&str] = &[
    "you won't believe",
    "what happened next",
    "this one trick",
    "shocking",
    "will blow your mind",
    "doctors hate",
    "secret",
    "top 10",
];

/// Texts shorter than this carry too little signal for a verdict.
const MIN_SIGNAL_CHARS: usize = 12;

/// OCR text returned when an image holds no readable run.
pub const NO_TEXT_SENTINEL: &str = "No text detected in image";

/// Shortest printable run treated as "text" by the fake OCR.
const MIN_OCR_RUN: usize = 8;

/// Longest OCR text echoed back; the full length is reported separately.
pub const OCR_ECHO_LIMIT: usize = 500;

/// A fake news verdict in wire terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeVerdict {
    pub prediction: &'static str,
    pub confidence: u8,
    pub explanation: String,
    pub key_points: Vec<String>,
}

/// A clickbait verdict in wire terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickbaitVerdict {
    pub score: u8,
    pub prediction: &'static str,
    pub explanation: String,
    pub clickbait_elements: Vec<String>,
}

fn hits<'a>(text: &str, markers: &[&'a str]) -> Vec<&'a str> {
    let lower = text.to_lowercase();
    markers.iter().copied().filter(|m| lower.contains(m)).collect()
}

/// Score `text` for fabricated content.
pub fn score_fake(text: &str) -> FakeVerdict {
    let text = text.trim();
    if text.is_empty() {
        return FakeVerdict {
            prediction: "Error",
            confidence: 0,
            explanation: "Please enter text to check".into(),
            key_points: Vec::new(),
        };
    }

    let found = hits(text, FAKE_MARKERS);
    if !found.is_empty() {
        let confidence = u8::try_from(60 + 16 * found.len()).unwrap_or(u8::MAX).min(95);
        return FakeVerdict {
            prediction: "Fake",
            confidence,
            explanation: format!(
                "The text relies on {} known misinformation markers.",
                found.len()
            ),
            key_points: found.iter().map(|m| format!("Contains \"{m}\"")).collect(),
        };
    }

    if text.chars().count() < MIN_SIGNAL_CHARS {
        return FakeVerdict {
            prediction: "Unknown",
            confidence: 0,
            explanation: "Not enough text to judge.".into(),
            key_points: Vec::new(),
        };
    }

    FakeVerdict {
        prediction: "Not Fake",
        confidence: 72,
        explanation: "No misinformation markers found.".into(),
        key_points: vec!["Neutral wording".into()],
    }
}

/// Score `text` as a headline.
pub fn score_clickbait(text: &str) -> ClickbaitVerdict {
    let found = hits(text, CLICKBAIT_MARKERS);
    let exclamations = text.matches('!').count();

    let raw = found.len() * 30 + exclamations.min(4) * 5;
    let score = u8::try_from(raw.min(100)).unwrap_or(100);

    let mut elements: Vec<String> =
        found.iter().map(|m| format!("Teaser phrase \"{m}\"")).collect();
    if exclamations > 0 {
        elements.push(format!("{exclamations} exclamation mark(s)"));
    }

    let (prediction, explanation) = if score > 50 {
        ("Clickbait", "The headline withholds information to provoke a click.")
    } else {
        ("Not Clickbait", "The headline states its content plainly.")
    };

    ClickbaitVerdict {
        score,
        prediction,
        explanation: explanation.into(),
        clickbait_elements: elements,
    }
}

/// Stand-in OCR: the longest run of printable ASCII in the image bytes.
///
/// Images produced for demos carry their "text" in a metadata chunk, which
/// this picks up.
pub fn extract_text(bytes: &[u8]) -> String {
    let longest = bytes
        .split(|b| !(b.is_ascii_graphic() || *b == b' '))
        .filter(|run| run.len() >= MIN_OCR_RUN)
        .max_by_key(|run| run.len());

    match longest {
        Some(run) => String::from_utf8_lossy(run).trim().to_string(),
        None => NO_TEXT_SENTINEL.to_string(),
    }
}

/// Cut `text` to [`OCR_ECHO_LIMIT`] characters, marking the cut.
pub fn truncate_echo(text: &str) -> String {
    if text.chars().count() > OCR_ECHO_LIMIT {
        let head: String = text.chars().take(OCR_ECHO_LIMIT).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
