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

use crate::app::App;
use crate::session::PLACEHOLDER;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

/// Horizontal padding to match header/footer inset.
const INPUT_PAD: u16 = 2;

/// Prompt prefix width: "❯ " = 2 columns
const PROMPT_WIDTH: u16 = 2;

/// Keeps a long draft from pushing the chat off screen.
const MAX_INPUT_HEIGHT: u16 = 8;

fn prompt_span() -> Span<'static> {
    Span::styled(
        format!("{} ", theme::PROMPT_CHAR),
        Style::default().fg(theme::GAVEL_GOLD),
    )
}

#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + INPUT_PAD,
        y: area.y,
        width: area.width.saturating_sub(INPUT_PAD * 2),
        height: area.height,
    };

    if app.input.is_empty() {
        let line = Line::from(vec![
            prompt_span(),
            Span::styled(PLACEHOLDER, Style::default().fg(theme::DIM)),
        ]);
        frame.render_widget(Paragraph::new(line), padded);
        frame.set_cursor_position((padded.x + PROMPT_WIDTH, padded.y));
        return;
    }

    let lines: Vec<Line> = app
        .input
        .lines
        .iter()
        .enumerate()
        .map(|(row, text)| {
            // continuation lines align with the text after "❯ "
            let prefix = if row == 0 {
                prompt_span()
            } else {
                Span::raw("  ")
            };
            Line::from(vec![prefix, Span::raw(text.clone())])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), padded);

    let content_width = usize::from(padded.width.saturating_sub(PROMPT_WIDTH));
    if content_width == 0 {
        return;
    }

    let mut visual_row: u16 = 0;
    for (row, line) in app.input.lines.iter().enumerate() {
        if row == app.input.cursor_row {
            let wrap_row = (app.input.cursor_col / content_width) as u16;
            let wrap_col = (app.input.cursor_col % content_width) as u16;
            let cursor_x = padded.x + PROMPT_WIDTH + wrap_col;
            let cursor_y = padded.y + visual_row + wrap_row;
            if cursor_x < padded.right() && cursor_y < padded.bottom() {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
            return;
        }
        visual_row = visual_row.saturating_add(wrapped_rows(line.chars().count(), content_width));
    }
}

#[allow(clippy::cast_possible_truncation)]
fn wrapped_rows(chars: usize, content_width: usize) -> u16 {
    ((chars + content_width) / content_width).max(1) as u16
}

/// Rows the input needs at `area_width`, capped so the chat keeps its space.
pub fn visual_line_count(app: &App, area_width: u16) -> u16 {
    if app.input.is_empty() {
        return 1;
    }
    let content_width = usize::from(
        area_width
            .saturating_sub(INPUT_PAD * 2)
            .saturating_sub(PROMPT_WIDTH),
    );
    if content_width == 0 {
        return u16::try_from(app.input.lines.len())
            .unwrap_or(u16::MAX)
            .min(MAX_INPUT_HEIGHT);
    }
    app.input
        .lines
        .iter()
        .map(|line| wrapped_rows(line.chars().count(), content_width))
        .fold(0u16, u16::saturating_add)
        .min(MAX_INPUT_HEIGHT)
}
