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

use super::input::InputState;
use crate::config::Variant;
use crate::session::{DotFrame, RenderEvent, SessionController};
use crate::transcript::Message;
use tokio::sync::mpsc;

pub struct App {
    pub session: SessionController,
    pub render_rx: mpsc::UnboundedReceiver<RenderEvent>,
    /// What the chat view shows; mirrors the transcript through render events.
    pub messages: Vec<Message>,
    /// Current frame of the typing indicator, `None` when no reply is pending.
    pub typing: Option<DotFrame>,
    pub input: InputState,
    pub scroll_offset: usize,
    /// Requested by user input or auto-scroll; clamped during render.
    pub scroll_target: usize,
    pub auto_scroll: bool,
    pub should_quit: bool,
    pub variant: Variant,
    /// Height of the chat viewport at the last render, for page scrolling.
    pub chat_height: u16,
}

impl App {
    #[must_use]
    pub fn new(
        session: SessionController,
        render_rx: mpsc::UnboundedReceiver<RenderEvent>,
        variant: Variant,
    ) -> Self {
        Self {
            session,
            render_rx,
            messages: Vec::new(),
            typing: None,
            input: InputState::new(),
            scroll_offset: 0,
            scroll_target: 0,
            auto_scroll: true,
            should_quit: false,
            variant,
            chat_height: 0,
        }
    }

    pub fn apply_render_event(&mut self, event: RenderEvent) {
        match event {
            RenderEvent::Appended(message) => {
                self.messages.push(message);
                self.auto_scroll = true;
            }
            RenderEvent::Cleared => {
                self.messages.clear();
                self.scroll_offset = 0;
                self.scroll_target = 0;
                self.auto_scroll = true;
            }
            RenderEvent::TypingStarted => self.typing = Some(DotFrame { active: 0 }),
            RenderEvent::TypingFrame(frame) => {
                if self.typing.is_some() {
                    self.typing = Some(frame);
                }
            }
            RenderEvent::TypingStopped => self.typing = None,
        }
    }

    /// Apply every queued render event without blocking.
    pub fn drain_render_events(&mut self) {
        while let Ok(event) = self.render_rx.try_recv() {
            self.apply_render_event(event);
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_target = self.scroll_target.saturating_sub(lines);
        self.auto_scroll = false;
    }

    // auto_scroll re-engages in chat::render once the bottom is reached
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_target = self.scroll_target.saturating_add(lines);
    }
}
