//! Keyboard bindings.
//!
//! | Key            | Message                          |
//! |----------------|----------------------------------|
//! | `Ctrl+T`       | toggle fake news / clickbait tab |
//! | `Ctrl+E`       | toggle text / image input        |
//! | `Ctrl+L`       | toggle language                  |
//! | `Ctrl+S`       | submit                           |
//! | `Ctrl+X`       | clear image                      |
//! | `Ctrl+R`       | OCR probe                        |
//! | `Ctrl+H`       | re-check backend health          |
//! | `Esc`          | dismiss alert, else result       |
//! | `Ctrl+C/Q`     | quit                             |
//! | `Enter`        | newline (text) / load path (image) |

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use karipap_models::InputMode;

use crate::app_state::{Message, ViewState};

/// Translate a key press into a message, given the current state.
pub fn message_for_key(state: &ViewState, key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'q') => Some(Message::Quit),
            KeyCode::Char('t') => Some(Message::ToggleTab),
            KeyCode::Char('e') => Some(Message::ToggleInputMode),
            KeyCode::Char('l') => Some(Message::ToggleLanguage),
            KeyCode::Char('s') => Some(Message::Submit),
            KeyCode::Char('x') => Some(Message::ClearImage),
            KeyCode::Char('r') => Some(Message::TestOcr),
            KeyCode::Char('h') => Some(Message::RecheckHealth),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc if state.alert.is_some() => Some(Message::DismissAlert),
        KeyCode::Esc => Some(Message::DismissResult),
        KeyCode::Enter if state.alert.is_some() => Some(Message::DismissAlert),
        KeyCode::Enter => Some(match state.effective_input_mode() {
            InputMode::Text => Message::InsertNewline,
            InputMode::Image => Message::ImagePathEntered,
        }),
        KeyCode::Backspace => Some(Message::Backspace),
        KeyCode::Tab => Some(Message::ToggleTab),
        KeyCode::Char(c) => Some(Message::InsertChar(c)),
        _ => None,
    }
}

/// Translate a bracketed paste.
///
/// In image mode a paste is a dropped file; in text mode it is text.
pub fn message_for_paste(state: &ViewState, text: String) -> Message {
    match state.effective_input_mode() {
        InputMode::Text => Message::PasteText(text),
        InputMode::Image => Message::PathPasted(text),
    }
}
