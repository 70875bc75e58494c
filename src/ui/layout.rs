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

use ratatui::layout::{Constraint, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub header_sep: Rect,
    pub body: Rect,
    pub input_sep: Rect,
    pub input: Rect,
    pub footer: Option<Rect>,
}

/// Below this height the header, separators and footer are dropped.
const COMPACT_HEIGHT: u16 = 8;

pub fn compute(area: Rect, input_lines: u16) -> AppLayout {
    let input_height = input_lines.max(1);
    let zero = |y: u16| Rect::new(area.x, y, area.width, 0);

    if area.height < COMPACT_HEIGHT {
        let [body, input] = Layout::vertical([Constraint::Min(1), Constraint::Length(input_height)])
            .areas(area);
        AppLayout {
            header: zero(area.y),
            header_sep: zero(area.y),
            body,
            input_sep: zero(input.y),
            input,
            footer: None,
        }
    } else {
        let [header, header_sep, body, input_sep, input, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .areas(area);
        AppLayout {
            header,
            header_sep,
            body,
            input_sep,
            input,
            footer: Some(footer),
        }
    }
}
