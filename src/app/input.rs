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

/// Multi-line compose buffer. Cursor positions are in chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub lines: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn current_len(&self) -> usize {
        self.lines[self.cursor_row].chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = byte_offset(&self.lines[self.cursor_row], self.cursor_col);
        self.lines[self.cursor_row].insert(at, c);
        self.cursor_col += 1;
    }

    pub fn insert_newline(&mut self) {
        let at = byte_offset(&self.lines[self.cursor_row], self.cursor_col);
        let tail = self.lines[self.cursor_row].split_off(at);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.lines.insert(self.cursor_row, tail);
    }

    /// Insert pasted text. `\r\n` and lone `\r` count as one line break.
    pub fn insert_str(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        for (i, segment) in normalized.split('\n').enumerate() {
            if i > 0 {
                self.insert_newline();
            }
            let at = byte_offset(&self.lines[self.cursor_row], self.cursor_col);
            self.lines[self.cursor_row].insert_str(at, segment);
            self.cursor_col += segment.chars().count();
        }
    }

    pub fn delete_char_before(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let at = byte_offset(&self.lines[self.cursor_row], self.cursor_col);
            self.lines[self.cursor_row].remove(at);
        } else if self.cursor_row > 0 {
            let joined = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.current_len();
            self.lines[self.cursor_row].push_str(&joined);
        }
    }

    pub fn delete_char_after(&mut self) {
        if self.cursor_col < self.current_len() {
            let at = byte_offset(&self.lines[self.cursor_row], self.cursor_col);
            self.lines[self.cursor_row].remove(at);
        } else if self.cursor_row + 1 < self.lines.len() {
            let joined = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&joined);
        }
    }

    /// Ctrl+W: drop trailing whitespace, then the word before the cursor.
    pub fn delete_word_before(&mut self) {
        if self.cursor_col == 0 {
            self.delete_char_before();
            return;
        }
        let chars: Vec<char> = self.lines[self.cursor_row].chars().collect();
        let mut start = self.cursor_col;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let line = &mut self.lines[self.cursor_row];
        let from = byte_offset(line, start);
        let to = byte_offset(line, self.cursor_col);
        line.replace_range(from..to, "");
        self.cursor_col = start;
    }

    pub fn move_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.current_len();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.current_len() {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.current_len());
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.current_len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_col = self.current_len();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}
