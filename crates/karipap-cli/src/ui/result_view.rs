//! Result card.
//!
//! [`ResultView::build`] turns an outcome into everything the card shows,
//! already localized and coloured. Drawing it (in the TUI or as plain text
//! for one-shot commands) is a separate, dumb step.

use chrono::Local;
use karipap_models::{
    ClickbaitPrediction, ClickbaitResult, DetectionOutcome, DetectionResult, FakeNewsPrediction,
    FakeNewsResult, InputMode, Percent,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::i18n::{t, Locale};

pub const GREEN: Color = Color::Rgb(0x2e, 0x7d, 0x32);
pub const YELLOW_GREEN: Color = Color::Rgb(0xce, 0xed, 0x02);
pub const AMBER: Color = Color::Rgb(0xed, 0x6c, 0x02);
pub const RED: Color = Color::Rgb(0xd3, 0x2f, 0x2f);
pub const GRAY: Color = Color::Rgb(0x6b, 0x72, 0x80);

/// Fill colour of a confidence bar.
pub fn confidence_color(confidence: Percent) -> Color {
    match confidence.value() {
        80.. => GREEN,
        60.. => YELLOW_GREEN,
        _ => RED,
    }
}

/// Fill colour of a clickbait score bar.
pub fn clickbait_color(score: Percent) -> Color {
    match score.value() {
        71.. => RED,
        41.. => AMBER,
        _ => GREEN,
    }
}

/// A labelled percentage bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: &'static str,
    pub percent: Percent,
    pub color: Color,
}

/// OCR text shown above the verdict for image inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrView {
    pub heading: &'static str,
    pub text: String,
    pub chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultBody {
    FakeNews {
        heading: &'static str,
        icon: &'static str,
        label: &'static str,
        color: Color,
        /// Absent when the backend reported zero confidence.
        confidence: Option<Bar>,
        explanation: Option<String>,
        key_points: Vec<String>,
    },
    Clickbait {
        heading: &'static str,
        badge: String,
        score: Bar,
        explanation: Option<String>,
        elements: Vec<String>,
    },
    Error {
        heading: &'static str,
        message: String,
        hint: &'static str,
    },
}

/// Everything the result card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub title: &'static str,
    pub input_badge: String,
    pub processing_time: Option<String>,
    pub received_at: String,
    pub ocr: Option<OcrView>,
    pub body: ResultBody,
    /// The other tab's verdict, shown under the main one.
    pub secondary: Option<ResultBody>,
}

impl ResultView {
    pub fn build(outcome: &DetectionOutcome, locale: Locale) -> Self {
        let s = t(locale);

        let input_badge = match outcome.input_type {
            InputMode::Image => format!("🖼️ {}", s.image),
            InputMode::Text => format!("📝 {}", s.text),
        };

        let processing_time = outcome
            .processing_time
            .map(|secs| format!("{}: {secs:.2} {}", s.processing_time, s.seconds));

        let received_at = format!(
            "{}: {}",
            s.received_at,
            outcome.received_at.with_timezone(&Local).format("%H:%M:%S")
        );

        let ocr = match (&outcome.input_type, &outcome.ocr) {
            (InputMode::Image, Some(extract)) => extract.displayable().map(|text| OcrView {
                heading: s.ocr_result,
                text: text.to_string(),
                chars: extract.char_count(),
            }),
            _ => None,
        };

        Self {
            title: s.detection_result,
            input_badge,
            processing_time,
            received_at,
            ocr,
            body: result_body(&outcome.result, locale),
            secondary: outcome.secondary.as_ref().map(|r| result_body(r, locale)),
        }
    }

    /// Plain-text rendition, for one-shot commands.
    pub fn to_lines(&self) -> Vec<String> {
        let mut out = vec![format!("== {} ==", self.title)];
        let mut header = vec![self.input_badge.clone()];
        header.extend(self.processing_time.clone());
        header.push(self.received_at.clone());
        out.push(header.join("  |  "));

        if let Some(ocr) = &self.ocr {
            out.push(String::new());
            out.push(format!("{} ({}):", ocr.heading, ocr.chars));
            out.extend(ocr.text.lines().map(|l| format!("  {l}")));
        }

        out.push(String::new());
        push_body_lines(&mut out, &self.body);
        if let Some(secondary) = &self.secondary {
            out.push(String::new());
            push_body_lines(&mut out, secondary);
        }
        out
    }

    /// Draw the card into `area`.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let mut header = vec![Span::styled(
            self.input_badge.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(time) = &self.processing_time {
            header.push(Span::raw(format!("   {time}")));
        }
        header.push(Span::styled(
            format!("   {}", self.received_at),
            Style::default().fg(Color::DarkGray),
        ));
        f.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

        match &self.secondary {
            Some(secondary) => {
                let halves = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(chunks[1]);
                render_body(f, halves[0], &self.body, self.ocr.as_ref());
                render_body(f, halves[1], secondary, None);
            }
            None => render_body(f, chunks[1], &self.body, self.ocr.as_ref()),
        }
    }
}

fn result_body(result: &DetectionResult, locale: Locale) -> ResultBody {
    match result {
        DetectionResult::FakeNews(r) => fake_news_body(r, locale),
        DetectionResult::Clickbait(r) => clickbait_body(r, locale),
        DetectionResult::Error(e) => {
            let s = t(locale);
            ResultBody::Error {
                heading: s.request_failed,
                message: e.message.clone(),
                hint: s.try_again,
            }
        }
    }
}

/// Verdict, bar and details of one section.
fn render_body(f: &mut Frame, area: Rect, body: &ResultBody, ocr: Option<&OcrView>) {
    let bar = match body {
        ResultBody::FakeNews { confidence, .. } => confidence.as_ref(),
        ResultBody::Clickbait { score, .. } => Some(score),
        ResultBody::Error { .. } => None,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                                 // spacer
            Constraint::Length(2),                                 // verdict
            Constraint::Length(if bar.is_some() { 1 } else { 0 }), // bar
            Constraint::Min(0),                                    // details
        ])
        .split(area);

    let muted = Style::default().fg(Color::Gray);
    let verdict = match body {
        ResultBody::FakeNews {
            heading,
            icon,
            label,
            color,
            ..
        } => vec![
            Line::from(Span::styled(format!("🕵️ {heading}"), muted)),
            Line::from(Span::styled(
                format!("{icon} {label}"),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
        ],
        ResultBody::Clickbait {
            heading,
            badge,
            score,
            ..
        } => vec![
            Line::from(Span::styled(format!("🎣 {heading}"), muted)),
            Line::from(Span::styled(
                badge.clone(),
                Style::default().fg(score.color).add_modifier(Modifier::BOLD),
            )),
        ],
        ResultBody::Error { heading, .. } => vec![Line::from(Span::styled(
            format!("🔴 {heading}"),
            Style::default().fg(RED).add_modifier(Modifier::BOLD),
        ))],
    };
    f.render_widget(Paragraph::new(verdict), chunks[1]);

    if let Some(bar) = bar {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(bar.color).bg(Color::Black))
            .percent(u16::from(bar.percent.value()))
            .label(format!("{} {}", bar.label, bar.percent));
        f.render_widget(gauge, chunks[2]);
    }

    let details = Paragraph::new(detail_lines(body, ocr)).wrap(Wrap { trim: false });
    f.render_widget(details, chunks[3]);
}

fn detail_lines(body: &ResultBody, ocr: Option<&OcrView>) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    if let Some(ocr) = ocr {
        lines.push(Line::from(Span::styled(
            format!("{} ({})", ocr.heading, ocr.chars),
            bold,
        )));
        lines.extend(ocr.text.lines().map(|l| Line::from(format!("  {l}"))));
        lines.push(Line::default());
    }

    let (explanation, items) = match body {
        ResultBody::FakeNews {
            explanation, key_points, ..
        } => (explanation.as_deref(), key_points.as_slice()),
        ResultBody::Clickbait {
            explanation, elements, ..
        } => (explanation.as_deref(), elements.as_slice()),
        ResultBody::Error { message, hint, .. } => {
            lines.push(Line::from(message.clone()));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(*hint, Style::default().fg(Color::DarkGray))));
            return lines;
        }
    };

    if let Some(text) = explanation {
        lines.push(Line::from(text.to_string()));
    }
    if !items.is_empty() {
        lines.push(Line::default());
        lines.extend(items.iter().map(|item| Line::from(format!(" • {item}"))));
    }
    lines
}

fn push_body_lines(out: &mut Vec<String>, body: &ResultBody) {
    match body {
        ResultBody::FakeNews {
            heading,
            icon,
            label,
            confidence,
            explanation,
            key_points,
            ..
        } => {
            out.push(format!("🕵️ {heading}"));
            out.push(format!("{icon} {label}"));
            if let Some(bar) = confidence {
                out.push(text_bar(bar));
            }
            push_section(out, explanation.as_deref(), key_points);
        }
        ResultBody::Clickbait {
            heading,
            badge,
            score,
            explanation,
            elements,
        } => {
            out.push(format!("🎣 {heading}"));
            out.push(badge.clone());
            out.push(text_bar(score));
            push_section(out, explanation.as_deref(), elements);
        }
        ResultBody::Error {
            heading,
            message,
            hint,
        } => {
            out.push(format!("🔴 {heading}"));
            out.push(message.clone());
            out.push(String::new());
            out.push((*hint).to_string());
        }
    }
}

fn fake_news_body(r: &FakeNewsResult, locale: Locale) -> ResultBody {
    let s = t(locale);
    let (icon, label, color) = match r.prediction {
        FakeNewsPrediction::Fake => ("❌", s.fake_news_result, RED),
        FakeNewsPrediction::NotFake => ("✅", s.real_news, GREEN),
        FakeNewsPrediction::Unknown => ("⚠️", s.cannot_determine, AMBER),
        FakeNewsPrediction::Error => ("🔴", s.system_error, GRAY),
    };
    let confidence = (r.confidence.value() > 0).then(|| Bar {
        label: s.confidence,
        percent: r.confidence,
        color: confidence_color(r.confidence),
    });
    ResultBody::FakeNews {
        heading: s.fake_news,
        icon,
        label,
        color,
        confidence,
        explanation: non_empty(&r.explanation),
        key_points: r.key_points.clone(),
    }
}

fn clickbait_body(r: &ClickbaitResult, locale: Locale) -> ResultBody {
    let s = t(locale);
    let badge = match r.prediction {
        ClickbaitPrediction::Clickbait => format!("🎣 {}", s.is_clickbait),
        ClickbaitPrediction::NotClickbait => format!("📰 {}", s.not_clickbait),
    };
    ResultBody::Clickbait {
        heading: s.clickbait,
        badge,
        score: Bar {
            label: s.clickbait_score,
            percent: r.score,
            color: clickbait_color(r.score),
        },
        explanation: non_empty(&r.explanation),
        elements: r.clickbait_elements.clone(),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn text_bar(bar: &Bar) -> String {
    const WIDTH: usize = 20;
    let filled = usize::from(bar.percent.value()) * WIDTH / 100;
    format!(
        "{}: [{}{}] {}",
        bar.label,
        "█".repeat(filled),
        "░".repeat(WIDTH - filled),
        bar.percent
    )
}

fn push_section(out: &mut Vec<String>, explanation: Option<&str>, items: &[String]) {
    if let Some(text) = explanation {
        out.push(String::new());
        out.push(text.to_string());
    }
    if !items.is_empty() {
        out.push(String::new());
        out.extend(items.iter().map(|i| format!("  • {i}")));
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use karipap_models::{DetectionResponse, DetectionTab, OcrExtract};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    use super::*;

    fn outcome(result: DetectionResult) -> DetectionOutcome {
        DetectionOutcome {
            input_type: InputMode::Text,
            processing_time: None,
            ocr: None,
            result,
            secondary: None,
            received_at: Utc::now(),
        }
    }

    #[test]
    fn fake_verdict_at_92_percent() {
        let response: DetectionResponse = serde_json::from_value(
            json!({"fake_news": {"prediction": "Fake", "confidence": 92, "explanation": "..."}}),
        )
        .unwrap();
        let outcome = response
            .into_outcome(DetectionTab::FakeNews, InputMode::Text, Utc::now())
            .unwrap();

        let view = ResultView::build(&outcome, Locale::En);
        let ResultBody::FakeNews {
            icon,
            label,
            color,
            confidence,
            explanation,
            ..
        } = view.body
        else {
            panic!("expected fake news body");
        };
        assert_eq!((icon, label, color), ("❌", "Fake News", RED));
        let bar = confidence.unwrap();
        assert_eq!(bar.percent.value(), 92);
        assert_eq!(bar.color, GREEN);
        assert_eq!(explanation.as_deref(), Some("..."));
        assert_eq!(view.input_badge, "📝 Text");
    }

    #[test]
    fn prediction_styles() {
        let cases = [
            (FakeNewsPrediction::NotFake, "✅", "Real News", GREEN),
            (FakeNewsPrediction::Unknown, "⚠️", "Cannot Determine", AMBER),
            (FakeNewsPrediction::Error, "🔴", "System Error", GRAY),
        ];
        for (prediction, want_icon, want_label, want_color) in cases {
            let r = FakeNewsResult {
                prediction,
                confidence: Percent::from(50),
                explanation: String::new(),
                key_points: Vec::new(),
            };
            let ResultBody::FakeNews {
                icon,
                label,
                color,
                explanation,
                ..
            } = fake_news_body(&r, Locale::En)
            else {
                panic!("expected fake news body");
            };
            assert_eq!((icon, label, color), (want_icon, want_label, want_color));
            assert_eq!(explanation, None);
        }
    }

    #[test]
    fn zero_confidence_has_no_bar() {
        let r = FakeNewsResult {
            prediction: FakeNewsPrediction::Unknown,
            confidence: Percent::ZERO,
            explanation: String::new(),
            key_points: Vec::new(),
        };
        assert!(matches!(
            fake_news_body(&r, Locale::En),
            ResultBody::FakeNews { confidence: None, .. }
        ));
    }

    #[test]
    fn color_bands() {
        assert_eq!(confidence_color(Percent::from(80)), GREEN);
        assert_eq!(confidence_color(Percent::from(79)), YELLOW_GREEN);
        assert_eq!(confidence_color(Percent::from(60)), YELLOW_GREEN);
        assert_eq!(confidence_color(Percent::from(59)), RED);

        assert_eq!(clickbait_color(Percent::from(71)), RED);
        assert_eq!(clickbait_color(Percent::from(70)), AMBER);
        assert_eq!(clickbait_color(Percent::from(41)), AMBER);
        assert_eq!(clickbait_color(Percent::from(40)), GREEN);
    }

    #[test]
    fn clickbait_badge_and_elements() {
        let view = ResultView::build(
            &outcome(DetectionResult::Clickbait(ClickbaitResult {
                score: Percent::from(85),
                prediction: ClickbaitPrediction::Clickbait,
                explanation: "Teaser".into(),
                clickbait_elements: vec!["You won't believe".into()],
            })),
            Locale::Zh,
        );
        let ResultBody::Clickbait { badge, score, elements, .. } = &view.body else {
            panic!("expected clickbait body");
        };
        assert_eq!(badge, "🎣 标题党");
        assert_eq!(score.color, RED);
        assert_eq!(elements.len(), 1);
        assert_eq!(view.title, "检测结果");
    }

    #[test]
    fn error_card() {
        let view = ResultView::build(
            &outcome(DetectionResult::error("HTTP error! status: 500")),
            Locale::En,
        );
        assert_eq!(
            view.body,
            ResultBody::Error {
                heading: "Request failed",
                message: "HTTP error! status: 500".into(),
                hint: "Press Esc and try again",
            }
        );
        let lines = view.to_lines();
        assert!(lines.iter().any(|l| l == "HTTP error! status: 500"));
    }

    #[test]
    fn ocr_text_shown_only_when_usable() {
        let mut o = outcome(DetectionResult::error("x"));
        o.input_type = InputMode::Image;
        o.processing_time = Some(1.5);

        o.ocr = Some(OcrExtract {
            text: "Sky is green".into(),
            length: Some(40),
        });
        let view = ResultView::build(&o, Locale::En);
        assert_eq!(view.ocr.as_ref().map(|v| v.chars), Some(40));
        assert_eq!(view.input_badge, "🖼️ Image");
        assert_eq!(view.processing_time.as_deref(), Some("Processing Time: 1.50 seconds"));

        o.ocr = Some(OcrExtract {
            text: "OCR识别失败: quota".into(),
            length: None,
        });
        assert!(ResultView::build(&o, Locale::En).ocr.is_none());

        o.ocr = Some(OcrExtract {
            text: "未在图片中检测到文字".into(),
            length: None,
        });
        assert!(ResultView::build(&o, Locale::En).ocr.is_none());
    }

    #[test]
    fn text_bar_fill() {
        let bar = Bar {
            label: "Confidence",
            percent: Percent::from(50),
            color: GREEN,
        };
        assert_eq!(
            text_bar(&bar),
            format!("Confidence: [{}{}] 50%", "█".repeat(10), "░".repeat(10))
        );
    }

    #[test]
    fn both_sections_render_on_one_card() {
        let response: DetectionResponse = serde_json::from_value(json!({
            "input_type": "text",
            "processing_time": 0.4,
            "fake_news": {"prediction": "Not Fake", "confidence": 81, "explanation": "Sourced."},
            "clickbait": {"score": 12, "prediction": "Not Clickbait", "explanation": "Plain."},
        }))
        .unwrap();
        let outcome = response
            .into_outcome(DetectionTab::FakeNews, InputMode::Text, Utc::now())
            .unwrap();

        let view = ResultView::build(&outcome, Locale::En);
        assert!(matches!(view.body, ResultBody::FakeNews { .. }));
        let Some(ResultBody::Clickbait { badge, score, .. }) = &view.secondary else {
            panic!("expected clickbait as secondary");
        };
        assert_eq!(badge, "📰 Not Clickbait");
        assert_eq!(score.color, GREEN);

        let lines = view.to_lines();
        let pos = |needle: &str| lines.iter().position(|l| l.contains(needle)).unwrap();
        assert!(pos("Real News") < pos("Not Clickbait"));
        assert!(pos("Sourced.") < pos("Plain."));

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(screen.contains("Real News"));
        assert!(screen.contains("Not Clickbait"));
    }

    #[test]
    fn single_section_has_no_secondary() {
        let view = ResultView::build(&outcome(DetectionResult::error("x")), Locale::En);
        assert!(view.secondary.is_none());
    }
}
