//! Detection requests.

use uuid::Uuid;

use crate::error::ModelError;
use crate::input::{ImagePayload, PendingInput};
use crate::mode::{DetectionTab, InputMode};

/// One user-initiated detection.
///
/// Every request gets a fresh id so that its settlement can be matched to
/// the request that is actually in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionRequest {
    /// Correlation id, unique per submit.
    pub id: Uuid,
    /// Verdict requested.
    pub tab: DetectionTab,
    /// Input snapshot.
    pub input: PendingInput,
}

impl DetectionRequest {
    /// A text request. Whitespace-only text is rejected.
    ///
    /// The text is sent as typed, without trimming.
    pub fn text(tab: DetectionTab, text: impl Into<String>) -> Result<Self, ModelError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ModelError::EmptyText);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            tab,
            input: PendingInput::Text(text),
        })
    }

    /// An image request. Images are only classified for fake news.
    pub fn image(payload: ImagePayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            tab: DetectionTab::FakeNews,
            input: PendingInput::Image(payload),
        }
    }

    /// Which kind of input this request carries.
    pub fn input_mode(&self) -> InputMode {
        match self.input {
            PendingInput::Text(_) => InputMode::Text,
            PendingInput::Image(_) => InputMode::Image,
        }
    }
}
