use std::path::PathBuf;

use karipap_models::{
    BackendHealth, DetectionOutcome, DetectionRequest, DetectionTab, ImageFile, ImagePayload,
    InputMode, OcrProbe, SelectedImage,
};
use karipap_sdk::BackendContract;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::effects::LoadError;
use crate::i18n::Locale;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// What the single outstanding request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Detection(InputMode),
    OcrProbe,
}

/// The one request allowed in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub request_id: Uuid,
    pub kind: RequestKind,
}

/// Per-submission lifecycle.
///
/// `Idle → Submitting → ResultDisplayed | ErrorDisplayed → Idle`; the last
/// step happens on the next user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting(InFlight),
    ResultDisplayed,
    ErrorDisplayed,
}

impl Phase {
    pub fn is_submitting(self) -> bool {
        matches!(self, Phase::Submitting(_))
    }

    /// The in-flight request, if any.
    pub fn in_flight(self) -> Option<InFlight> {
        match self {
            Phase::Submitting(in_flight) => Some(in_flight),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// OCR status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OcrStatus {
    #[default]
    Idle,
    Extracting,
    Completed,
    NoText,
    Failed,
    Testing,
    TestSucceeded { chars: usize },
    TestFailed(String),
}

// ---------------------------------------------------------------------------
// Alert
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Warning,
}

/// A blocking modal. Input other than dismiss or quit is ignored while one
/// is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ViewState {
    // Configuration, fixed at startup.
    pub contract: BackendContract,
    pub max_image_bytes: u64,

    pub locale: Locale,
    pub tab: DetectionTab,
    /// Remembered input mode; the clickbait tab overrides it with text.
    pub input_mode: InputMode,

    pub text: String,
    pub path_input: String,
    pub image: Option<SelectedImage>,
    pub ocr_status: OcrStatus,

    pub phase: Phase,
    pub outcome: Option<DetectionOutcome>,
    pub health: Option<BackendHealth>,
    pub alert: Option<Alert>,

    pub ticks: u64,
    pub should_quit: bool,
}

impl ViewState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            contract: config.contract(),
            max_image_bytes: config.max_image_bytes,
            locale: config.locale,
            tab: DetectionTab::default(),
            input_mode: InputMode::default(),
            text: String::new(),
            path_input: String::new(),
            image: None,
            ocr_status: OcrStatus::Idle,
            phase: Phase::Idle,
            outcome: None,
            health: None,
            alert: None,
            ticks: 0,
            should_quit: false,
        }
    }

    /// Input mode actually in effect on the current tab.
    pub fn effective_input_mode(&self) -> InputMode {
        self.tab.effective_input_mode(self.input_mode)
    }

    pub fn can_submit(&self) -> bool {
        !self.phase.is_submitting() && self.alert.is_none()
    }
}

// ---------------------------------------------------------------------------
// Messages & effects
// ---------------------------------------------------------------------------

/// Everything that can change the view state.
#[derive(Debug, Clone)]
pub enum Message {
    // ── Mode switches ──
    ToggleTab,
    SelectTab(DetectionTab),
    ToggleInputMode,
    SelectInputMode(InputMode),
    ToggleLanguage,

    // ── Text editing ──
    InsertChar(char),
    InsertNewline,
    Backspace,
    PasteText(String),

    // ── Image selection ──
    ImagePathEntered,
    PathPasted(String),
    ImageLoaded(Result<ImageFile, LoadError>),
    ClearImage,

    // ── Requests ──
    Submit,
    TestOcr,
    RecheckHealth,

    // ── Settlements ──
    DetectionSettled { id: Uuid, outcome: DetectionOutcome },
    OcrProbeSettled { id: Uuid, result: Result<OcrProbe, String> },
    HealthChecked { health: BackendHealth, announce: bool },

    // ── Dismissal ──
    DismissAlert,
    DismissResult,
    Quit,
}

impl Message {
    /// True for messages produced by the user, as opposed to settlements of
    /// effects.
    pub fn is_user_action(&self) -> bool {
        !matches!(
            self,
            Message::ImageLoaded(_)
                | Message::DetectionSettled { .. }
                | Message::OcrProbeSettled { .. }
                | Message::HealthChecked { .. }
        )
    }
}

/// Work the runtime performs on behalf of the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CheckHealth { announce: bool },
    LoadImage { path: PathBuf, max_bytes: u64 },
    Dispatch(DetectionRequest),
    ProbeOcr { id: Uuid, payload: ImagePayload },
    Quit,
}

pub trait AppController {
    fn update(&mut self, action: super::tui::Action);
    fn render(&mut self, f: &mut ratatui::Frame);
    fn should_quit(&self) -> bool;
}
