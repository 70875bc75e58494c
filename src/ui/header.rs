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
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_PAD: u16 = 2;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + HEADER_PAD,
        y: area.y,
        width: area.width.saturating_sub(HEADER_PAD * 2),
        height: area.height,
    };

    let sep = Span::styled("  \u{2502}  ", Style::default().fg(theme::DIM));
    let title = Line::from(vec![
        Span::styled(
            format!("{} ", theme::SCALES),
            Style::default().fg(theme::GAVEL_GOLD),
        ),
        Span::styled(
            "LegalGuru",
            Style::default()
                .fg(theme::GAVEL_GOLD)
                .add_modifier(Modifier::BOLD),
        ),
        sep,
        Span::styled(app.variant.subtitle(), Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(title), padded);

    let clear_hint = Line::from(vec![
        Span::styled("Ctrl+L ", Style::default().fg(Color::White)),
        Span::styled("clear chat", Style::default().fg(theme::DIM)),
    ]);
    frame.render_widget(
        Paragraph::new(clear_hint).alignment(Alignment::Right),
        padded,
    );
}
