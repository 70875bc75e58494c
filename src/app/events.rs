// LegalGuru - A terminal chat client for quick legal questions
// Copyright (C) 2025  LegalGuru contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use super::App;
use crate::session::{RejectReason, SubmitOutcome};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

const MOUSE_SCROLL_LINES: usize = 3;
const MIN_PAGE_LINES: usize = 3;

/// Handle one item from the terminal event stream. A closed or failing
/// stream ends the session, since no further input can arrive.
pub fn handle_terminal_input(app: &mut App, input: Option<std::io::Result<Event>>) {
    match input {
        Some(Ok(event)) => handle_terminal_event(app, event),
        Some(Err(err)) => {
            tracing::error!("terminal input failed: {err}");
            app.should_quit = true;
        }
        None => {
            tracing::info!("terminal input closed");
            app.should_quit = true;
        }
    }
}

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Paste(text) => app.input.insert_str(&text),
        // Resize is picked up by the next draw
        _ => {}
    }
}

fn is_printable_text_modifiers(modifiers: KeyModifiers) -> bool {
    let ctrl_alt =
        modifiers.contains(KeyModifiers::CONTROL) && modifiers.contains(KeyModifiers::ALT);
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) || ctrl_alt
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c' | 'q'), m) if m == KeyModifiers::CONTROL => app.should_quit = true,
        (KeyCode::Char('l'), m) if m == KeyModifiers::CONTROL => {
            tracing::info!("clear requested");
            app.session.clear();
        }
        (KeyCode::Char('w'), m) if m == KeyModifiers::CONTROL => app.input.delete_word_before(),
        (KeyCode::Enter, m) if m.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            app.input.insert_newline();
        }
        (KeyCode::Enter, _) => submit_input(app),
        (KeyCode::PageUp, _) => app.scroll_up(page_lines(app)),
        (KeyCode::PageDown, _) => app.scroll_down(page_lines(app)),
        (KeyCode::Left, _) => app.input.move_left(),
        (KeyCode::Right, _) => app.input.move_right(),
        (KeyCode::Up, _) => app.input.move_up(),
        (KeyCode::Down, _) => app.input.move_down(),
        (KeyCode::Home, _) => app.input.move_home(),
        (KeyCode::End, _) => app.input.move_end(),
        (KeyCode::Backspace, _) => app.input.delete_char_before(),
        (KeyCode::Delete, _) => app.input.delete_char_after(),
        (KeyCode::Esc, _) => app.input.clear(),
        (KeyCode::Char(c), m) if is_printable_text_modifiers(m) => app.input.insert_char(c),
        _ => {}
    }
}

fn submit_input(app: &mut App) {
    let text = app.input.text();
    match app.session.submit(&text) {
        SubmitOutcome::Sent => {
            app.input.clear();
            app.auto_scroll = true;
        }
        // keep the draft so it can be sent once the reply lands
        SubmitOutcome::Rejected(RejectReason::Busy) => {}
        SubmitOutcome::Rejected(RejectReason::Empty | RejectReason::Placeholder) => {
            app.input.clear()
        }
    }
}

fn page_lines(app: &App) -> usize {
    usize::from(app.chat_height.saturating_sub(1)).max(MIN_PAGE_LINES)
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(MOUSE_SCROLL_LINES),
        MouseEventKind::ScrollDown => app.scroll_down(MOUSE_SCROLL_LINES),
        _ => {}
    }
}
