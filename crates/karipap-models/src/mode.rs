//! Detection modes selected by the user.
//!
//! Two independent switches decide what the client sends and how the answer
//! is rendered: the [`DetectionTab`] (what kind of verdict is wanted) and the
//! [`InputMode`] (what kind of input is supplied).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// InputMode
// ---------------------------------------------------------------------------

/// Which input widget is shown: a text area or an image picker.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputMode {
    /// Freeform pasted text.
    #[default]
    Text,
    /// A single image file, OCR'd by the backend.
    Image,
}

impl InputMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            InputMode::Text => InputMode::Image,
            InputMode::Image => InputMode::Text,
        }
    }

    /// Parse the backend's `input_type` field.
    ///
    /// Anything other than `"image"` is treated as text, which is how the
    /// result header has always labelled unknown values.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("image") => InputMode::Image,
            _ => InputMode::Text,
        }
    }
}

// ---------------------------------------------------------------------------
// DetectionTab
// ---------------------------------------------------------------------------

/// Which verdict is requested: fake news or clickbait.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DetectionTab {
    /// Fake news classification (text or image input).
    #[default]
    FakeNews,
    /// Clickbait scoring (text input only).
    Clickbait,
}

impl DetectionTab {
    /// The other tab.
    pub fn toggled(self) -> Self {
        match self {
            DetectionTab::FakeNews => DetectionTab::Clickbait,
            DetectionTab::Clickbait => DetectionTab::FakeNews,
        }
    }

    /// The input mode actually in effect on this tab.
    ///
    /// The clickbait tab has no image picker, so it always reads text
    /// regardless of the remembered `selected` mode.
    pub fn effective_input_mode(self, selected: InputMode) -> InputMode {
        match self {
            DetectionTab::FakeNews => selected,
            DetectionTab::Clickbait => InputMode::Text,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_mode_toggles() {
        assert_eq!(InputMode::Text.toggled(), InputMode::Image);
        assert_eq!(InputMode::Image.toggled(), InputMode::Text);
    }

    #[test]
    fn input_mode_from_wire() {
        assert_eq!(InputMode::from_wire(Some("image")), InputMode::Image);
        assert_eq!(InputMode::from_wire(Some("text")), InputMode::Text);
        assert_eq!(InputMode::from_wire(None), InputMode::Text);
    }

    #[test]
    fn clickbait_tab_forces_text() {
        assert_eq!(
            DetectionTab::Clickbait.effective_input_mode(InputMode::Image),
            InputMode::Text
        );
        assert_eq!(
            DetectionTab::FakeNews.effective_input_mode(InputMode::Image),
            InputMode::Image
        );
    }

    #[test]
    fn tab_parses_kebab_case() {
        assert_eq!("fake-news".parse::<DetectionTab>().unwrap(), DetectionTab::FakeNews);
        assert_eq!("clickbait".parse::<DetectionTab>().unwrap(), DetectionTab::Clickbait);
        assert!("fake_news".parse::<DetectionTab>().is_err());
        assert_eq!(DetectionTab::FakeNews.to_string(), "fake-news");
    }

    #[test]
    fn tab_enum_iter() {
        use strum::IntoEnumIterator;
        let tabs: Vec<_> = DetectionTab::iter().collect();
        assert_eq!(tabs, vec![DetectionTab::FakeNews, DetectionTab::Clickbait]);
    }
}
