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

//! Bubble sizing heuristics.
//!
//! Widths are in pixels of an abstract canvas. The terminal UI maps columns
//! to pixels with [`CELL_WIDTH_PX`]; nothing here depends on the UI.

/// Horizontal space reserved for avatar, padding and scrollbar.
pub const CHROME_ALLOWANCE_PX: i32 = 200;
/// Pixels per terminal cell when the UI converts to and from columns.
pub const CELL_WIDTH_PX: u32 = 8;

pub const PLAIN_MIN_PX: u32 = 300;
pub const DENSE_MIN_PX: u32 = 400;
pub const DENSE_MAX_PX: u32 = 700;

const PLAIN_PX_PER_CHAR: u64 = 7;
const MULTILINE_PX_PER_CHAR: u64 = 10;
const LONG_WORD_CHARS: usize = 30;
const FENCE_MARKER: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    /// Code fences or unbreakable tokens: needs a wide bubble.
    Dense,
    Plain,
}

#[must_use]
pub fn classify(text: &str) -> Density {
    let has_long_word = text
        .split_whitespace()
        .any(|word| word.chars().count() > LONG_WORD_CHARS);
    if text.contains(FENCE_MARKER) || has_long_word {
        Density::Dense
    } else {
        Density::Plain
    }
}

/// Width available to bubbles inside a viewport of `viewport_width` pixels.
#[must_use]
pub fn available_width(viewport_width: i32) -> i32 {
    viewport_width.saturating_sub(CHROME_ALLOWANCE_PX)
}

/// Presentation width for `text` given `available_width` pixels.
///
/// Total over its inputs: a non-positive `available_width` is treated as 1,
/// and when the available space is below a floor the floor wins, so the
/// result is never below 300 (plain) or 400 (dense).
#[must_use]
pub fn wrap_width(text: &str, available_width: i32) -> u32 {
    let available = available_width.max(1).unsigned_abs();

    match classify(text) {
        Density::Dense => clamp_floor_wins(available, DENSE_MIN_PX, DENSE_MAX_PX),
        Density::Plain => {
            let chars = text.chars().count() as u64;
            let lines = text.matches('\n').count() as u64 + 1;
            let preferred = if lines > 1 {
                chars * MULTILINE_PX_PER_CHAR / lines
            } else {
                chars * PLAIN_PX_PER_CHAR
            };
            let base = u32::try_from(preferred).unwrap_or(u32::MAX).min(available);
            clamp_floor_wins(base, PLAIN_MIN_PX, available)
        }
    }
}

/// Bubble width in terminal columns for a viewport of `viewport_cols`.
/// Never wider than the drawable area and never zero.
#[allow(clippy::cast_possible_wrap)]
#[must_use]
pub fn wrap_columns(text: &str, viewport_cols: u16) -> u16 {
    let viewport_px = i32::from(viewport_cols).saturating_mul(CELL_WIDTH_PX as i32);
    let px = wrap_width(text, available_width(viewport_px));
    let cols = u16::try_from(px / CELL_WIDTH_PX).unwrap_or(u16::MAX);
    cols.min(viewport_cols).max(1)
}

fn clamp_floor_wins(value: u32, floor: u32, ceiling: u32) -> u32 {
    value.min(ceiling).max(floor)
}
