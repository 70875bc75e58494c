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
use crate::ui::message;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;

/// Build every chat line for a viewport `width` columns wide. Bubbles are
/// pre-wrapped, so one `Line` is one terminal row.
pub fn chat_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for msg in &app.messages {
        message::render_message(msg, width, &mut lines);
    }
    if let Some(frame) = app.typing {
        message::render_typing(frame, &mut lines);
    }
    lines
}

#[allow(clippy::cast_possible_truncation)]
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    app.chat_height = area.height;
    let lines = chat_lines(app, area.width);
    let content_height = lines.len();
    let viewport_height = usize::from(area.height);
    let paragraph = Paragraph::new(Text::from(lines));

    if content_height <= viewport_height {
        // Short content: bottom-aligned so the latest message sits above the input
        let offset = (viewport_height - content_height) as u16;
        let render_area = Rect {
            x: area.x,
            y: area.y + offset,
            width: area.width,
            height: content_height as u16,
        };
        app.scroll_offset = 0;
        app.scroll_target = 0;
        app.auto_scroll = true;
        frame.render_widget(paragraph, render_area);
    } else {
        let max_scroll = content_height - viewport_height;
        if app.auto_scroll {
            app.scroll_target = max_scroll;
        }
        app.scroll_target = app.scroll_target.min(max_scroll);
        app.scroll_offset = app.scroll_target;
        if app.scroll_offset >= max_scroll {
            app.auto_scroll = true;
        }
        let scroll = u16::try_from(app.scroll_offset).unwrap_or(u16::MAX);
        frame.render_widget(paragraph.scroll((scroll, 0)), area);
    }
}
