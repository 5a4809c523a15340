//! The controller: a pure reducer from [`Message`] to state changes plus
//! [`Effect`]s.
//!
//! Nothing in here touches the network or the filesystem. The runtime
//! executes the returned effects and feeds their settlements back in as
//! messages.

use std::path::PathBuf;

use karipap_models::{
    DetectionOutcome, DetectionRequest, DetectionResult, DetectionTab, FakeNewsPrediction,
    ImageFile, InputMode, ModelError, OcrProbe, OcrReading, SelectedImage,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::app_state::{Alert, Effect, InFlight, Message, OcrStatus, Phase, RequestKind, ViewState};
use crate::effects::LoadError;
use crate::i18n::{t, Locale};

/// Apply `msg` to `state` and return the effects to run.
pub fn update(state: &mut ViewState, msg: Message) -> Vec<Effect> {
    if matches!(msg, Message::Quit) {
        state.should_quit = true;
        return vec![Effect::Quit];
    }

    if msg.is_user_action() {
        // An open alert swallows everything but its own dismissal.
        if state.alert.is_some() && !matches!(msg, Message::DismissAlert) {
            return Vec::new();
        }
        if matches!(state.phase, Phase::ResultDisplayed | Phase::ErrorDisplayed) {
            state.phase = Phase::Idle;
        }
    }

    match msg {
        // ── Mode switches ──
        Message::ToggleTab => state.tab = state.tab.toggled(),
        Message::SelectTab(tab) => state.tab = tab,
        Message::ToggleInputMode => {
            if state.tab == DetectionTab::FakeNews {
                state.input_mode = state.input_mode.toggled();
            }
        }
        Message::SelectInputMode(mode) => {
            if state.tab == DetectionTab::FakeNews {
                state.input_mode = mode;
            }
        }
        Message::ToggleLanguage => state.locale = state.locale.next(),

        // ── Text editing ──
        Message::InsertChar(c) => active_buffer(state).push(c),
        Message::InsertNewline => {
            if state.effective_input_mode() == InputMode::Text {
                state.text.push('\n');
            }
        }
        Message::Backspace => {
            active_buffer(state).pop();
        }
        Message::PasteText(text) => match state.effective_input_mode() {
            InputMode::Text => state.text.push_str(&text),
            InputMode::Image => return load_path(state, &text),
        },

        // ── Image selection ──
        Message::ImagePathEntered => {
            let raw = std::mem::take(&mut state.path_input);
            return load_path(state, &raw);
        }
        Message::PathPasted(raw) => return load_path(state, &raw),
        Message::ImageLoaded(result) => image_loaded(state, result),
        Message::ClearImage => {
            state.image = None;
            state.path_input.clear();
            state.ocr_status = OcrStatus::Idle;
        }

        // ── Requests ──
        Message::Submit => return submit(state),
        Message::TestOcr => return test_ocr(state),
        Message::RecheckHealth => return vec![Effect::CheckHealth { announce: true }],

        // ── Settlements ──
        Message::DetectionSettled { id, outcome } => detection_settled(state, id, outcome),
        Message::OcrProbeSettled { id, result } => ocr_probe_settled(state, id, result),
        Message::HealthChecked { health, announce } => {
            if announce {
                let strings = t(state.locale);
                state.alert = Some(Alert::info(format!(
                    "{}: {}\n{}: {}",
                    strings.backend_status,
                    health.status,
                    strings.vision_api,
                    health.vision_api.as_deref().unwrap_or("-"),
                )));
            }
            state.health = Some(health);
        }

        // ── Dismissal ──
        Message::DismissAlert => state.alert = None,
        Message::DismissResult => state.outcome = None,
        Message::Quit => {}
    }

    Vec::new()
}

/// The buffer keystrokes go to: the text area, or the image path prompt.
fn active_buffer(state: &mut ViewState) -> &mut String {
    match state.effective_input_mode() {
        InputMode::Text => &mut state.text,
        InputMode::Image => &mut state.path_input,
    }
}

// ---------------------------------------------------------------------------
// Image selection
// ---------------------------------------------------------------------------

/// Clean up a path typed or dropped into the terminal.
///
/// Terminals paste dropped files quoted, shell-escaped or as `file://`
/// URIs, sometimes with a trailing newline.
pub fn normalize_path(raw: &str) -> Option<PathBuf> {
    let mut s = raw.trim();
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
        }
    }
    let s = s.strip_prefix("file://").unwrap_or(s);
    let unescaped = s.replace("\\ ", " ");
    (!unescaped.is_empty()).then(|| PathBuf::from(unescaped))
}

fn load_path(state: &mut ViewState, raw: &str) -> Vec<Effect> {
    if state.effective_input_mode() != InputMode::Image {
        return Vec::new();
    }
    match normalize_path(raw) {
        Some(path) => vec![Effect::LoadImage {
            path,
            max_bytes: state.max_image_bytes,
        }],
        None => Vec::new(),
    }
}

fn image_loaded(state: &mut ViewState, result: Result<ImageFile, LoadError>) {
    let max_bytes = state.max_image_bytes;
    let accepted = result.and_then(|file| Ok(SelectedImage::accept(file, max_bytes)?));

    match accepted {
        Ok(image) => {
            info!(
                file = %image.preview.file_name,
                mime = %image.preview.mime,
                size = image.preview.size,
                "image selected"
            );
            state.image = Some(image);
            state.path_input.clear();
            state.ocr_status = OcrStatus::Idle;
        }
        Err(e) => {
            debug!(error = %e, "image rejected");
            state.alert = Some(Alert::warning(load_error_message(state.locale, &e)));
        }
    }
}

/// User-facing text for a file that could not be selected.
pub fn load_error_message(locale: Locale, err: &LoadError) -> String {
    match err {
        LoadError::Read(reason) => locale.read_file_error(reason),
        LoadError::Rejected(ModelError::ImageTooLarge { limit, .. }) => {
            locale.image_size_error(*limit)
        }
        LoadError::Rejected(_) => t(locale).select_image_error.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn submit(state: &mut ViewState) -> Vec<Effect> {
    if state.phase.is_submitting() {
        return Vec::new();
    }
    let strings = t(state.locale);

    if !state.contract.supports(state.tab) {
        state.alert = Some(Alert::info(strings.under_development));
        return Vec::new();
    }

    let mode = state.effective_input_mode();
    let request = match mode {
        InputMode::Text => match DetectionRequest::text(state.tab, state.text.clone()) {
            Ok(request) => request,
            Err(_) => {
                state.alert = Some(Alert::warning(strings.enter_text_error));
                return Vec::new();
            }
        },
        InputMode::Image => match &state.image {
            Some(image) => DetectionRequest::image(image.payload.clone()),
            None => {
                state.alert = Some(Alert::warning(strings.select_image_error));
                return Vec::new();
            }
        },
    };

    state.outcome = None;
    if mode == InputMode::Image {
        state.ocr_status = OcrStatus::Extracting;
    }
    state.phase = Phase::Submitting(InFlight {
        request_id: request.id,
        kind: RequestKind::Detection(mode),
    });
    vec![Effect::Dispatch(request)]
}

fn test_ocr(state: &mut ViewState) -> Vec<Effect> {
    if state.phase.is_submitting() {
        return Vec::new();
    }
    let payload = match (&state.image, state.effective_input_mode()) {
        (Some(image), InputMode::Image) => image.payload.clone(),
        _ => {
            state.alert = Some(Alert::warning(t(state.locale).select_image_error));
            return Vec::new();
        }
    };

    let id = Uuid::new_v4();
    state.ocr_status = OcrStatus::Testing;
    state.phase = Phase::Submitting(InFlight {
        request_id: id,
        kind: RequestKind::OcrProbe,
    });
    vec![Effect::ProbeOcr { id, payload }]
}

// ---------------------------------------------------------------------------
// Settlements
// ---------------------------------------------------------------------------

/// Take the in-flight request if `id` names it with the expected kind.
fn claim(state: &ViewState, id: Uuid, probe: bool) -> Option<RequestKind> {
    match state.phase.in_flight() {
        Some(InFlight { request_id, kind })
            if request_id == id && matches!(kind, RequestKind::OcrProbe) == probe =>
        {
            Some(kind)
        }
        _ => {
            debug!(request_id = %id, "ignoring stale settlement");
            None
        }
    }
}

fn detection_settled(state: &mut ViewState, id: Uuid, outcome: DetectionOutcome) {
    let Some(RequestKind::Detection(mode)) = claim(state, id, false) else {
        return;
    };

    if mode == InputMode::Image {
        state.ocr_status = ocr_status_for(&outcome);
    }
    state.phase = if outcome.result.is_error() {
        Phase::ErrorDisplayed
    } else {
        Phase::ResultDisplayed
    };
    state.outcome = Some(outcome);
}

/// OCR status after an image detection settles.
pub fn ocr_status_for(outcome: &DetectionOutcome) -> OcrStatus {
    match &outcome.result {
        DetectionResult::Error(_) => return OcrStatus::Failed,
        DetectionResult::FakeNews(r) if r.prediction == FakeNewsPrediction::Error => {
            return OcrStatus::Failed;
        }
        _ => {}
    }
    match outcome.ocr.as_ref().map(karipap_models::OcrExtract::reading) {
        Some(OcrReading::Failed) => OcrStatus::Failed,
        Some(OcrReading::NoText) => OcrStatus::NoText,
        Some(OcrReading::Extracted) | None => OcrStatus::Completed,
    }
}

fn ocr_probe_settled(state: &mut ViewState, id: Uuid, result: Result<OcrProbe, String>) {
    if claim(state, id, true).is_none() {
        return;
    }
    state.phase = Phase::Idle;

    match result {
        Ok(probe) if probe.success && OcrReading::classify(&probe.text) != OcrReading::Failed => {
            state.ocr_status = OcrStatus::TestSucceeded { chars: probe.length };
            let title = t(state.locale).ocr_result_title;
            state.alert = Some(Alert::info(format!("{title}:\n{}", probe.text)));
        }
        Ok(probe) => state.ocr_status = OcrStatus::TestFailed(probe.text),
        Err(reason) => state.ocr_status = OcrStatus::TestFailed(reason),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use karipap_models::{
        BackendHealth, ClickbaitPrediction, ClickbaitResult, FakeNewsResult, ImageFile, OcrExtract,
        PendingInput, Percent, MIB,
    };
    use karipap_sdk::BackendContract;

    use super::*;
    use crate::config::{AppConfig, Overrides};
    use crate::i18n::Locale;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn state_with(contract: BackendContract) -> ViewState {
        let config = AppConfig::resolve(Overrides {
            contract: Some(contract),
            lang: Some(Locale::En),
            ..Overrides::default()
        })
        .unwrap();
        ViewState::new(&config)
    }

    fn state() -> ViewState {
        state_with(BackendContract::Versioned)
    }

    fn png(size: usize) -> ImageFile {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.resize(size, 0);
        ImageFile {
            file_name: "scan.png".into(),
            mime: "image/png".into(),
            dimensions: Some((4, 3)),
            bytes,
        }
    }

    fn type_text(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            assert!(update(state, Message::InsertChar(c)).is_empty());
        }
    }

    fn with_image(state: &mut ViewState) {
        update(state, Message::SelectInputMode(InputMode::Image));
        update(state, Message::ImageLoaded(Ok(png(1024))));
        assert!(state.image.is_some());
    }

    fn dispatched(effects: &[Effect]) -> &DetectionRequest {
        match effects {
            [Effect::Dispatch(request)] => request,
            other => panic!("expected one dispatch, got {other:?}"),
        }
    }

    fn fake_outcome(
        prediction: FakeNewsPrediction,
        confidence: u8,
        input_type: InputMode,
    ) -> DetectionOutcome {
        DetectionOutcome {
            input_type,
            processing_time: Some(1.2),
            ocr: None,
            result: DetectionResult::FakeNews(FakeNewsResult {
                prediction,
                confidence: Percent::from(confidence),
                explanation: "...".into(),
                key_points: Vec::new(),
            }),
            secondary: None,
            received_at: Utc::now(),
        }
    }

    // -- mode switches --------------------------------------------------------

    #[test]
    fn switching_modes_never_produces_effects() {
        let mut s = state();
        for msg in [
            Message::ToggleTab,
            Message::ToggleTab,
            Message::ToggleInputMode,
            Message::SelectInputMode(InputMode::Text),
            Message::SelectTab(DetectionTab::Clickbait),
            Message::ToggleLanguage,
        ] {
            assert!(update(&mut s, msg).is_empty());
        }
        assert_eq!(s.tab, DetectionTab::Clickbait);
        assert_eq!(s.locale, Locale::Zh);
    }

    #[test]
    fn clickbait_tab_is_text_only() {
        let mut s = state();
        update(&mut s, Message::SelectInputMode(InputMode::Image));
        update(&mut s, Message::ToggleTab);
        assert_eq!(s.effective_input_mode(), InputMode::Text);

        update(&mut s, Message::ToggleInputMode);
        assert_eq!(s.input_mode, InputMode::Image, "toggle ignored on clickbait tab");

        update(&mut s, Message::ToggleTab);
        assert_eq!(s.effective_input_mode(), InputMode::Image);
    }

    // -- image selection ------------------------------------------------------

    #[test]
    fn accepted_image_gets_preview_and_payload() {
        let mut s = state();
        with_image(&mut s);
        let image = s.image.as_ref().unwrap();
        assert!(image.preview.data_url.starts_with("data:image/png;base64,"));
        assert!(!image.payload.as_str().starts_with("data:"));
        assert_eq!(image.preview.size, 1024);
        assert!(s.alert.is_none());
    }

    #[test]
    fn oversized_image_is_rejected_without_state_change() {
        let mut s = state();
        update(&mut s, Message::SelectInputMode(InputMode::Image));
        let effects = update(&mut s, Message::ImageLoaded(Ok(png(11 * 1024 * 1024))));

        assert!(effects.is_empty());
        assert!(s.image.is_none());
        assert_eq!(s.alert.unwrap().message, "Image size cannot exceed 10MB");
    }

    #[test]
    fn legacy_ceiling_is_five_megabytes() {
        let mut s = state_with(BackendContract::Legacy);
        update(&mut s, Message::SelectInputMode(InputMode::Image));
        update(&mut s, Message::ImageLoaded(Ok(png(usize::try_from(5 * MIB).unwrap() + 1))));
        assert!(s.image.is_none());
        assert!(s.alert.is_some());

        let mut s = state_with(BackendContract::Legacy);
        update(&mut s, Message::SelectInputMode(InputMode::Image));
        update(&mut s, Message::ImageLoaded(Ok(png(usize::try_from(5 * MIB).unwrap()))));
        assert!(s.image.is_some());
    }

    #[test]
    fn non_image_is_rejected() {
        let mut s = state();
        update(&mut s, Message::SelectInputMode(InputMode::Image));
        let file = ImageFile {
            file_name: "notes.txt".into(),
            mime: "application/octet-stream".into(),
            dimensions: None,
            bytes: b"hello".to_vec(),
        };
        update(&mut s, Message::ImageLoaded(Ok(file)));
        assert!(s.image.is_none());
        assert_eq!(s.alert.unwrap().message, "Please select an image");
    }

    #[test]
    fn rejected_image_keeps_previous_selection() {
        let mut s = state();
        with_image(&mut s);
        let before = s.image.clone();
        update(&mut s, Message::ImageLoaded(Ok(png(11 * 1024 * 1024))));
        assert_eq!(s.image, before);
    }

    #[test]
    fn clearing_resets_preview_payload_and_ocr_status() {
        let mut s = state();
        with_image(&mut s);
        s.ocr_status = OcrStatus::Completed;
        s.path_input = "leftover".into();

        assert!(update(&mut s, Message::ClearImage).is_empty());
        assert!(s.image.is_none());
        assert_eq!(s.ocr_status, OcrStatus::Idle);
        assert!(s.path_input.is_empty());
    }

    #[test]
    fn entered_and_pasted_paths_load_images() {
        let mut s = state();
        update(&mut s, Message::SelectInputMode(InputMode::Image));
        type_text(&mut s, "/tmp/a.png");
        assert_eq!(
            update(&mut s, Message::ImagePathEntered),
            vec![Effect::LoadImage {
                path: PathBuf::from("/tmp/a.png"),
                max_bytes: 10 * MIB,
            }]
        );
        assert!(s.path_input.is_empty());

        assert_eq!(
            update(&mut s, Message::PasteText("'/tmp/my scan.png'\n".into())),
            vec![Effect::LoadImage {
                path: PathBuf::from("/tmp/my scan.png"),
                max_bytes: 10 * MIB,
            }]
        );
    }

    #[test]
    fn paste_in_text_mode_is_text() {
        let mut s = state();
        assert!(update(&mut s, Message::PasteText("/tmp/a.png".into())).is_empty());
        assert_eq!(s.text, "/tmp/a.png");
    }

    #[test]
    fn unreadable_file_alerts() {
        let mut s = state();
        update(&mut s, Message::SelectInputMode(InputMode::Image));
        let err = LoadError::Read("No such file or directory".into());
        update(&mut s, Message::ImageLoaded(Err(err)));
        assert_eq!(s.alert.unwrap().message, "Cannot read file: No such file or directory");
    }

    #[test]
    fn file_refused_by_the_loader_alerts_with_the_ceiling() {
        let mut s = state();
        with_image(&mut s);
        let before = s.image.clone();
        let err = LoadError::Rejected(ModelError::ImageTooLarge {
            file_name: "movie.mp4".into(),
            size: 64 * MIB,
            limit: 10 * MIB,
        });

        assert!(update(&mut s, Message::ImageLoaded(Err(err))).is_empty());
        assert_eq!(s.image, before);
        assert_eq!(s.alert.unwrap().message, "Image size cannot exceed 10MB");
    }

    #[test]
    fn legacy_paths_carry_the_legacy_ceiling() {
        let mut s = state_with(BackendContract::Legacy);
        update(&mut s, Message::SelectInputMode(InputMode::Image));
        assert_eq!(
            update(&mut s, Message::PathPasted("/tmp/a.png".into())),
            vec![Effect::LoadImage {
                path: PathBuf::from("/tmp/a.png"),
                max_bytes: 5 * MIB,
            }]
        );
    }

    #[test]
    fn path_normalization() {
        assert_eq!(normalize_path("  /tmp/a.png \n"), Some(PathBuf::from("/tmp/a.png")));
        assert_eq!(normalize_path("\"/tmp/a b.png\""), Some(PathBuf::from("/tmp/a b.png")));
        assert_eq!(normalize_path("/tmp/a\\ b.png"), Some(PathBuf::from("/tmp/a b.png")));
        assert_eq!(normalize_path("file:///tmp/a.png"), Some(PathBuf::from("/tmp/a.png")));
        assert_eq!(normalize_path("   "), None);
    }

    // -- submit ---------------------------------------------------------------

    #[test]
    fn text_submit_dispatches_once() {
        let mut s = state();
        type_text(&mut s, "Breaking: sky is green");
        let effects = update(&mut s, Message::Submit);
        let request = dispatched(&effects);

        assert_eq!(request.input, PendingInput::Text("Breaking: sky is green".into()));
        assert_eq!(request.tab, DetectionTab::FakeNews);
        assert_eq!(s.phase.in_flight().unwrap().request_id, request.id);
        assert!(!s.can_submit());

        // Second submit while pending is ignored.
        assert!(update(&mut s, Message::Submit).is_empty());
        assert!(update(&mut s, Message::TestOcr).is_empty());
    }

    #[test]
    fn submit_clears_previous_result() {
        let mut s = state();
        s.outcome = Some(fake_outcome(FakeNewsPrediction::NotFake, 80, InputMode::Text));
        type_text(&mut s, "again");
        update(&mut s, Message::Submit);
        assert!(s.outcome.is_none());
    }

    #[test]
    fn blank_text_is_blocked() {
        let mut s = state();
        type_text(&mut s, "   ");
        assert!(update(&mut s, Message::Submit).is_empty());
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.alert.unwrap().message, "Please enter text to analyze");
    }

    #[test]
    fn image_submit_without_image_is_blocked() {
        let mut s = state();
        update(&mut s, Message::SelectInputMode(InputMode::Image));
        assert!(update(&mut s, Message::Submit).is_empty());
        assert_eq!(s.alert.unwrap().message, "Please select an image");
    }

    #[test]
    fn image_submit_sends_payload_and_extracts() {
        let mut s = state();
        with_image(&mut s);
        let payload = s.image.as_ref().unwrap().payload.clone();
        let effects = update(&mut s, Message::Submit);

        assert_eq!(dispatched(&effects).input, PendingInput::Image(payload));
        assert_eq!(s.ocr_status, OcrStatus::Extracting);
    }

    #[test]
    fn clickbait_submit_uses_text() {
        let mut s = state();
        with_image(&mut s);
        s.ocr_status = OcrStatus::Completed;
        update(&mut s, Message::SelectTab(DetectionTab::Clickbait));
        type_text(&mut s, "You won't believe this");
        let effects = update(&mut s, Message::Submit);
        let request = dispatched(&effects);
        assert_eq!(request.tab, DetectionTab::Clickbait);
        assert_eq!(request.input_mode(), InputMode::Text);
        assert_eq!(s.ocr_status, OcrStatus::Completed, "text submissions leave OCR status alone");
    }

    #[test]
    fn refused_submit_leaves_ocr_status_alone() {
        let mut s = state_with(BackendContract::Legacy);
        with_image(&mut s);
        s.ocr_status = OcrStatus::NoText;
        update(&mut s, Message::SelectTab(DetectionTab::Clickbait));

        assert!(update(&mut s, Message::Submit).is_empty());
        assert_eq!(s.ocr_status, OcrStatus::NoText);
        assert_eq!(s.phase, Phase::Idle);
    }

    #[test]
    fn legacy_clickbait_is_under_development() {
        let mut s = state_with(BackendContract::Legacy);
        s.locale = Locale::En;
        update(&mut s, Message::ToggleTab);
        type_text(&mut s, "You won't believe this");
        assert!(update(&mut s, Message::Submit).is_empty());
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.alert.unwrap().message, "This feature is under development, stay tuned...");
    }

    // -- settlement -----------------------------------------------------------

    #[test]
    fn successful_settlement_displays_result() {
        let mut s = state();
        type_text(&mut s, "Breaking: sky is green");
        let id = dispatched(&update(&mut s, Message::Submit)).id;

        let outcome = fake_outcome(FakeNewsPrediction::Fake, 92, InputMode::Text);
        let settled = Message::DetectionSettled {
            id,
            outcome: outcome.clone(),
        };
        assert!(update(&mut s, settled).is_empty());
        assert_eq!(s.phase, Phase::ResultDisplayed);
        assert_eq!(s.outcome, Some(outcome));
        assert!(s.can_submit());

        // Next user action returns to idle, result stays on screen.
        update(&mut s, Message::InsertChar('!'));
        assert_eq!(s.phase, Phase::Idle);
        assert!(s.outcome.is_some());
    }

    #[test]
    fn failed_settlement_displays_error() {
        let mut s = state();
        type_text(&mut s, "anything");
        let id = dispatched(&update(&mut s, Message::Submit)).id;

        let outcome = DetectionOutcome::failed(InputMode::Text, "HTTP error! status: 500");
        update(&mut s, Message::DetectionSettled { id, outcome });
        assert_eq!(s.phase, Phase::ErrorDisplayed);
        assert!(matches!(s.outcome.unwrap().result, DetectionResult::Error(_)));
    }

    #[test]
    fn stale_settlement_is_ignored() {
        let mut s = state();
        type_text(&mut s, "anything");
        update(&mut s, Message::Submit);
        let phase = s.phase;

        let outcome = fake_outcome(FakeNewsPrediction::Fake, 92, InputMode::Text);
        update(&mut s, Message::DetectionSettled { id: Uuid::new_v4(), outcome });
        assert_eq!(s.phase, phase);
        assert!(s.outcome.is_none());
    }

    #[test]
    fn settlement_without_request_is_ignored() {
        let mut s = state();
        let outcome = fake_outcome(FakeNewsPrediction::Fake, 92, InputMode::Text);
        update(&mut s, Message::DetectionSettled { id: Uuid::new_v4(), outcome });
        assert_eq!(s.phase, Phase::Idle);
        assert!(s.outcome.is_none());
    }

    #[test]
    fn image_settlement_sets_ocr_status() {
        let mut s = state();
        with_image(&mut s);
        let id = dispatched(&update(&mut s, Message::Submit)).id;

        let mut outcome = fake_outcome(FakeNewsPrediction::Unknown, 0, InputMode::Image);
        outcome.ocr = Some(OcrExtract {
            text: "No text detected in image".into(),
            length: None,
        });
        update(&mut s, Message::DetectionSettled { id, outcome });
        assert_eq!(s.ocr_status, OcrStatus::NoText);
    }

    #[test]
    fn ocr_status_mapping() {
        let mut ok = fake_outcome(FakeNewsPrediction::Fake, 90, InputMode::Image);
        ok.ocr = Some(OcrExtract {
            text: "Sky is green".into(),
            length: Some(12),
        });
        assert_eq!(ocr_status_for(&ok), OcrStatus::Completed);

        let error_prediction = fake_outcome(FakeNewsPrediction::Error, 0, InputMode::Image);
        assert_eq!(ocr_status_for(&error_prediction), OcrStatus::Failed);

        let transport = DetectionOutcome::failed(InputMode::Image, "network error");
        assert_eq!(ocr_status_for(&transport), OcrStatus::Failed);

        let mut sentinel = fake_outcome(FakeNewsPrediction::Unknown, 0, InputMode::Image);
        sentinel.ocr = Some(OcrExtract {
            text: "OCR失败: quota".into(),
            length: None,
        });
        assert_eq!(ocr_status_for(&sentinel), OcrStatus::Failed);

        let clickbait = DetectionOutcome {
            result: DetectionResult::Clickbait(ClickbaitResult {
                score: Percent::from(10),
                prediction: ClickbaitPrediction::NotClickbait,
                explanation: String::new(),
                clickbait_elements: Vec::new(),
            }),
            ..fake_outcome(FakeNewsPrediction::Fake, 0, InputMode::Image)
        };
        assert_eq!(ocr_status_for(&clickbait), OcrStatus::Completed);
    }

    // -- OCR probe ------------------------------------------------------------

    #[test]
    fn ocr_probe_round() {
        let mut s = state();
        with_image(&mut s);
        let effects = update(&mut s, Message::TestOcr);
        let [Effect::ProbeOcr { id, .. }] = effects.as_slice() else {
            panic!("expected probe, got {effects:?}");
        };
        assert_eq!(s.ocr_status, OcrStatus::Testing);
        assert!(s.phase.is_submitting());

        // A detection settlement can't claim a probe.
        let outcome = fake_outcome(FakeNewsPrediction::Fake, 92, InputMode::Image);
        update(&mut s, Message::DetectionSettled { id: *id, outcome });
        assert!(s.outcome.is_none());

        let probe = OcrProbe {
            success: true,
            text: "Sky is green".into(),
            length: 12,
        };
        update(&mut s, Message::OcrProbeSettled { id: *id, result: Ok(probe) });
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.ocr_status, OcrStatus::TestSucceeded { chars: 12 });
        assert_eq!(s.alert.unwrap().message, "OCR result:\nSky is green");
        assert!(s.outcome.is_none());
    }

    #[test]
    fn ocr_probe_failure() {
        let mut s = state();
        with_image(&mut s);
        let effects = update(&mut s, Message::TestOcr);
        let [Effect::ProbeOcr { id, .. }] = effects.as_slice() else {
            panic!("expected probe");
        };
        update(&mut s, Message::OcrProbeSettled { id: *id, result: Err("network error".into()) });
        assert_eq!(s.ocr_status, OcrStatus::TestFailed("network error".into()));
        assert!(s.alert.is_none());
    }

    #[test]
    fn ocr_probe_needs_image() {
        let mut s = state();
        assert!(update(&mut s, Message::TestOcr).is_empty());
        assert!(s.alert.is_some());
    }

    // -- alerts, health, quit -------------------------------------------------

    #[test]
    fn alert_blocks_input_until_dismissed() {
        let mut s = state();
        update(&mut s, Message::Submit);
        assert!(s.alert.is_some());

        type_text(&mut s, "ignored");
        assert!(update(&mut s, Message::Submit).is_empty());
        assert!(s.text.is_empty());

        update(&mut s, Message::DismissAlert);
        assert!(s.alert.is_none());
        type_text(&mut s, "ok");
        assert_eq!(s.text, "ok");
    }

    #[test]
    fn health_is_stored_and_optionally_announced() {
        let mut s = state();
        update(
            &mut s,
            Message::HealthChecked {
                health: BackendHealth::unavailable(),
                announce: false,
            },
        );
        assert_eq!(s.health, Some(BackendHealth::unavailable()));
        assert!(s.alert.is_none());

        assert_eq!(
            update(&mut s, Message::RecheckHealth),
            vec![Effect::CheckHealth { announce: true }]
        );
        update(
            &mut s,
            Message::HealthChecked {
                health: BackendHealth::unavailable(),
                announce: true,
            },
        );
        assert!(s.alert.unwrap().message.starts_with("Backend status: unavailable"));
    }

    #[test]
    fn dismiss_result_and_quit() {
        let mut s = state();
        s.outcome = Some(fake_outcome(FakeNewsPrediction::Fake, 92, InputMode::Text));
        update(&mut s, Message::DismissResult);
        assert!(s.outcome.is_none());

        s.alert = Some(Alert::info("still quits"));
        assert_eq!(update(&mut s, Message::Quit), vec![Effect::Quit]);
        assert!(s.should_quit);
    }
}
