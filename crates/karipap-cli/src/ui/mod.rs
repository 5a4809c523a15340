pub mod result_view;

use karipap_models::{DetectionTab, InputMode, SelectedImage};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app_state::{AlertKind, OcrStatus, ViewState};
use crate::i18n::{t, Locale};
use result_view::ResultView;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn draw(f: &mut Frame, state: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),      // Title
            Constraint::Length(3),      // Tabs
            Constraint::Percentage(35), // Input
            Constraint::Length(1),      // Submit / status
            Constraint::Min(0),         // Result
            Constraint::Length(1),      // Help
        ])
        .split(f.area());

    draw_title(f, state, chunks[0]);
    draw_tabs(f, state, chunks[1]);
    match state.effective_input_mode() {
        InputMode::Text => draw_text_input(f, state, chunks[2]),
        InputMode::Image => draw_image_input(f, state, chunks[2]),
    }
    draw_status(f, state, chunks[3]);

    match &state.outcome {
        Some(outcome) => ResultView::build(outcome, state.locale).render(f, chunks[4]),
        None => f.render_widget(Block::default().borders(Borders::ALL), chunks[4]),
    }

    f.render_widget(
        Paragraph::new(t(state.locale).help).style(Style::default().fg(Color::DarkGray)),
        chunks[5],
    );

    if let Some(alert) = &state.alert {
        let s = t(state.locale);
        let area = centered_rect(60, 30, f.area());
        let bg = match alert.kind {
            AlertKind::Info => Color::Blue,
            AlertKind::Warning => Color::Red,
        };
        let block = Paragraph::new(alert.message.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", s.notice))
                    .title_bottom(Line::from(s.dismiss_hint).alignment(Alignment::Right))
                    .style(Style::default().bg(bg).fg(Color::White)),
            );
        f.render_widget(Clear, area);
        f.render_widget(block, area);
    }
}

fn draw_title(f: &mut Frame, state: &ViewState, area: Rect) {
    let s = t(state.locale);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(28)])
        .split(area);

    let title = vec![
        Line::from(Span::styled(
            s.title,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(s.subtitle, Style::default().fg(Color::Gray))),
    ];
    f.render_widget(Paragraph::new(title), halves[0]);

    let health = match &state.health {
        None => Span::styled(s.backend_checking, Style::default().fg(Color::DarkGray)),
        Some(h) if h.is_healthy() => {
            Span::styled(s.backend_online, Style::default().fg(Color::Green))
        }
        Some(_) => Span::styled(s.backend_offline, Style::default().fg(Color::Red)),
    };
    let right = vec![
        Line::from(health),
        Line::from(format!("{} · {}", state.locale.label(), state.contract)),
    ];
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), halves[1]);
}

fn draw_tabs(f: &mut Frame, state: &ViewState, area: Rect) {
    let s = t(state.locale);
    let selected = match state.tab {
        DetectionTab::FakeNews => 0,
        DetectionTab::Clickbait => 1,
    };
    let mode = match state.effective_input_mode() {
        InputMode::Text => s.text_input,
        InputMode::Image => s.image_input,
    };
    let tabs = Tabs::new(vec![format!("🕵️ {}", s.fake_news), format!("🎣 {}", s.clickbait)])
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_bottom(Line::from(format!(" {mode} ")).alignment(Alignment::Right)),
        )
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn draw_text_input(f: &mut Frame, state: &ViewState, area: Rect) {
    let s = t(state.locale);
    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", s.text_input));

    let body = if state.text.is_empty() {
        Paragraph::new(s.text_placeholder).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(format!("{}▏", state.text))
    };
    f.render_widget(body.block(block).wrap(Wrap { trim: false }), area);
}

fn draw_image_input(f: &mut Frame, state: &ViewState, area: Rect) {
    let s = t(state.locale);
    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", s.image_input));

    let mut lines = vec![
        Line::from(s.upload_main),
        Line::from(Span::styled(
            state.locale.upload_hint(state.max_image_bytes),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(format!("{}: ", s.image_path), Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}▏", state.path_input)),
        ]),
    ];

    if let Some(image) = &state.image {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", s.selected_image),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(describe_image(image)),
        ]));
    }
    if let Some(status) = ocr_status_text(&state.ocr_status, state.locale) {
        lines.push(Line::from(status));
    }

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_status(f: &mut Frame, state: &ViewState, area: Rect) {
    let s = t(state.locale);
    let line = if state.phase.is_submitting() {
        let frame = SPINNER[usize::try_from(state.ticks % 4).unwrap_or(0)];
        let label = match state.effective_input_mode() {
            InputMode::Text => s.analyzing,
            InputMode::Image => s.processing,
        };
        Line::from(Span::styled(format!(" {frame} {label}"), Style::default().fg(Color::Yellow)))
    } else {
        let label = match state.tab {
            DetectionTab::FakeNews => s.detect_news,
            DetectionTab::Clickbait => s.detect_clickbait,
        };
        Line::from(vec![
            Span::styled(" [^S] ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("🔍 {label}"), Style::default().add_modifier(Modifier::BOLD)),
        ])
    };
    f.render_widget(Paragraph::new(line), area);
}

/// `name · image/png · 12.3 KB · 640×480`
pub fn describe_image(image: &SelectedImage) -> String {
    let p = &image.preview;
    #[allow(clippy::cast_precision_loss)]
    let kb = p.size as f64 / 1024.0;
    let mut parts = vec![p.file_name.clone(), p.mime.clone(), format!("{kb:.1} KB")];
    if let Some((w, h)) = p.dimensions {
        parts.push(format!("{w}×{h}"));
    }
    parts.join(" · ")
}

pub fn ocr_status_text(status: &OcrStatus, locale: Locale) -> Option<String> {
    let s = t(locale);
    let text = match status {
        OcrStatus::Idle => return None,
        OcrStatus::Extracting => s.extracting_text.to_string(),
        OcrStatus::Completed => s.ocr_completed.to_string(),
        OcrStatus::NoText => s.ocr_no_text.to_string(),
        OcrStatus::Failed => s.ocr_failed.to_string(),
        OcrStatus::Testing => s.ocr_testing.to_string(),
        OcrStatus::TestSucceeded { chars } => locale.ocr_test_succeeded(*chars),
        OcrStatus::TestFailed(reason) => locale.ocr_test_failed(reason),
    };
    Some(text)
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
