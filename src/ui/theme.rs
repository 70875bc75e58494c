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

use ratatui::style::Color;

// Accent
pub const GAVEL_GOLD: Color = Color::Rgb(201, 162, 39);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const PROMPT_CHAR: &str = "❯";
pub const SEPARATOR_CHAR: &str = "─";
pub const SCALES: &str = "\u{2696}";

// Sender labels
pub const ROLE_USER: Color = Color::White;
pub const ROLE_ASSISTANT: Color = GAVEL_GOLD;

// Bubble backgrounds
pub const USER_BUBBLE_BG: Color = Color::Rgb(30, 64, 110);
pub const ASSISTANT_BUBBLE_BG: Color = Color::Rgb(40, 44, 52);
pub const ERROR_BUBBLE_BG: Color = Color::Rgb(72, 24, 24);
pub const ERROR_FG: Color = Color::Red;

// Typing indicator
pub const DOT: &str = "•";
pub const DOT_ACTIVE: Color = GAVEL_GOLD;
pub const DOT_IDLE: Color = DIM;
