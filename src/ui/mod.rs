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

mod chat;
mod header;
mod input;
mod layout;
mod message;
pub mod theme;

pub use chat::chat_lines;
pub use message::wrap_text;

use crate::app::App;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const FOOTER_PAD: u16 = 2;

pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = frame.area();
    let input_lines = input::visual_line_count(app, frame_area.width);
    let areas = layout::compute(frame_area, input_lines);

    if areas.header.height > 0 {
        header::render(frame, areas.header, app);
        render_separator(frame, areas.header_sep);
    }

    chat::render(frame, areas.body, app);

    render_separator(frame, areas.input_sep);
    input::render(frame, areas.input, app);

    if let Some(footer) = areas.footer {
        render_footer(frame, footer, app);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::White));
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(theme::DIM));
    let hints = Line::from(vec![
        key("Enter"),
        desc(" send  "),
        key("Shift+Enter"),
        desc(" newline  "),
        key("PgUp/PgDn"),
        desc(" scroll  "),
        key("Ctrl+C"),
        desc(" quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), padded);

    if app.session.is_busy() {
        let status = Line::from(Span::styled(
            "LegalGuru is typing",
            Style::default().fg(theme::GAVEL_GOLD),
        ));
        frame.render_widget(Paragraph::new(status).alignment(Alignment::Right), padded);
    }
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(usize::from(area.width));
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}
