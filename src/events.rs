use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;

const PAGE_LINES: u16 = 5;

/// Handles one terminal event. Returns `true` when the UI should quit.
pub fn handle_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
        Event::Paste(data) => {
            tracing::debug!("Paste event with {} characters", data.len());
            app.paste(&data);
            false
        }
        _ => false,
    }
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => true,
        // Enter is the Ask control; the panel refuses it while a request is outstanding.
        (_, KeyCode::Enter) => {
            app.submit();
            false
        }
        // The question field is a single line, so vertical keys scroll the answer.
        (_, KeyCode::Up) => {
            app.scroll_answer_up(1);
            false
        }
        (_, KeyCode::Down) => {
            app.scroll_answer_down(1);
            false
        }
        (_, KeyCode::PageUp) => {
            app.scroll_answer_up(PAGE_LINES);
            false
        }
        (_, KeyCode::PageDown) => {
            app.scroll_answer_down(PAGE_LINES);
            false
        }
        _ => {
            app.input(key);
            false
        }
    }
}
