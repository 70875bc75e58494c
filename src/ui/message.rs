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

use crate::bubble;
use crate::gateway::classify_error_text;
use crate::session::{DOT_COUNT, DotFrame};
use crate::transcript::{Message, Sender};
use crate::ui::theme;
use chrono::Local;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar as _, UnicodeWidthStr as _};

const USER_LABEL: &str = "You";
const ASSISTANT_LABEL: &str = "LegalGuru";
const BUBBLE_PAD: usize = 1;
const TIME_FORMAT: &str = "%I:%M %p";

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Where a bubble of `cols` columns starts inside a row of `width` columns.
fn indent_for(side: Side, cols: usize, width: usize) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => width.saturating_sub(cols),
    }
}

fn indent_span(cols: usize) -> Span<'static> {
    Span::raw(" ".repeat(cols))
}

/// Render one transcript entry: label, bubble body and timestamp, followed by
/// a blank spacer line.
pub fn render_message(message: &Message, width: u16, out: &mut Vec<Line<'static>>) {
    let row_width = usize::from(width);
    let side = match message.sender {
        Sender::User => Side::Right,
        Sender::Assistant => Side::Left,
    };

    let (label, label_style, bubble_style) = match (message.sender, message.is_error()) {
        (Sender::User, _) => (
            USER_LABEL.to_owned(),
            Style::default()
                .fg(theme::ROLE_USER)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White).bg(theme::USER_BUBBLE_BG),
        ),
        (Sender::Assistant, false) => (
            ASSISTANT_LABEL.to_owned(),
            Style::default()
                .fg(theme::ROLE_ASSISTANT)
                .add_modifier(Modifier::BOLD),
            Style::default()
                .fg(Color::White)
                .bg(theme::ASSISTANT_BUBBLE_BG),
        ),
        (Sender::Assistant, true) => (
            format!(
                "{ASSISTANT_LABEL} \u{00b7} {}",
                classify_error_text(&message.text).label()
            ),
            Style::default()
                .fg(theme::ERROR_FG)
                .add_modifier(Modifier::BOLD),
            Style::default()
                .fg(theme::ERROR_FG)
                .bg(theme::ERROR_BUBBLE_BG),
        ),
    };

    let cols = usize::from(bubble::wrap_columns(&message.text, width));
    let inner = cols.saturating_sub(BUBBLE_PAD * 2).max(1);

    out.push(Line::from(vec![
        indent_span(indent_for(side, label.width(), row_width)),
        Span::styled(label, label_style),
    ]));

    let indent = indent_for(side, cols, row_width);
    for text in wrap_text(&message.text, inner) {
        out.push(bubble_line(indent, &text, cols, bubble_style));
    }

    let stamp = message
        .created_at
        .with_timezone(&Local)
        .format(TIME_FORMAT)
        .to_string();
    out.push(Line::from(vec![
        indent_span(indent_for(side, stamp.width(), row_width)),
        Span::styled(stamp, Style::default().fg(theme::DIM)),
    ]));
    out.push(Line::default());
}

fn bubble_line(indent: usize, text: &str, cols: usize, style: Style) -> Line<'static> {
    let pad = " ".repeat(BUBBLE_PAD);
    let fill = " ".repeat(cols.saturating_sub(text.width() + BUBBLE_PAD * 2));
    Line::from(vec![
        indent_span(indent),
        Span::styled(format!("{pad}{text}{fill}{pad}"), style),
    ])
}

/// The "LegalGuru is typing" bubble: three dots, the active one highlighted.
pub fn render_typing(frame: DotFrame, out: &mut Vec<Line<'static>>) {
    out.push(Line::from(Span::styled(
        ASSISTANT_LABEL,
        Style::default()
            .fg(theme::ROLE_ASSISTANT)
            .add_modifier(Modifier::BOLD),
    )));

    let bg = Style::default().bg(theme::ASSISTANT_BUBBLE_BG);
    let mut spans = vec![Span::styled(" ", bg)];
    for i in 0..DOT_COUNT {
        let style = if frame.is_highlighted(i) {
            bg.fg(theme::DOT_ACTIVE).add_modifier(Modifier::BOLD)
        } else {
            bg.fg(theme::DOT_IDLE)
        };
        spans.push(Span::styled(theme::DOT, style));
        spans.push(Span::styled(" ", bg));
    }
    out.push(Line::from(spans));
    out.push(Line::default());
}

/// Greedy word wrap by display width. Explicit line breaks are kept, leading
/// indentation survives on the first row of each line, and words wider than
/// `width` are split across rows.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        wrap_line(line, width, &mut rows);
    }
    rows
}

fn wrap_line(line: &str, width: usize, rows: &mut Vec<String>) {
    let indent = &line[..line.len() - line.trim_start().len()];
    let mut current = if indent.width() < width {
        indent.to_owned()
    } else {
        String::new()
    };
    let mut current_width = current.width();
    let mut has_word = false;

    for word in line.split_whitespace() {
        let word_width = word.width();
        let gap = usize::from(has_word);
        if current_width + gap + word_width <= width {
            if has_word {
                current.push(' ');
            }
            current.push_str(word);
            current_width += gap + word_width;
        } else if word_width <= width {
            if has_word {
                rows.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
            current.push_str(word);
            current_width = word_width;
        } else {
            if has_word {
                rows.push(std::mem::take(&mut current));
                current_width = 0;
            }
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && current_width > 0 {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }
        has_word = true;
    }
    rows.push(current);
}
