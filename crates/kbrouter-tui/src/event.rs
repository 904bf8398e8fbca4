//! TUI event handling

use crate::app::App;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub async fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key);
            }
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Input is ignored while a turn is in flight
    if app.is_loading {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('l') => app.clear_chat(),
            KeyCode::Char('y') => app.copy_last_answer(),
            KeyCode::Char('c') => app.should_quit = true,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            if !app.input.is_empty() {
                app.input.clear();
                app.cursor_pos = 0;
            } else {
                app.should_quit = true;
            }
        }
        KeyCode::Enter => app.submit(),
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Left => app.move_left(),
        KeyCode::Right => app.move_right(),
        KeyCode::Up | KeyCode::PageUp => app.scroll_up(),
        KeyCode::Down | KeyCode::PageDown => app.scroll_down(),
        _ => {}
    }
}
