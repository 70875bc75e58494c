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

use std::time::{Duration, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_millis(400);
pub const DOT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorPhase {
    Idle,
    Animating { active: usize },
}

/// One frame of the waiting indicator: `active` is highlighted, the other
/// dots are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotFrame {
    pub active: usize,
}

impl DotFrame {
    #[must_use]
    pub fn is_highlighted(self, index: usize) -> bool {
        index == self.active
    }
}

/// Three-dot "typing" indicator.
///
/// Ticks only fire from [`TypingAnimator::poll`], which the UI loop calls on
/// its own thread, so once `stop` returns no further frame can be produced.
/// There is at most one scheduled tick at any time.
#[derive(Debug)]
pub struct TypingAnimator {
    phase: AnimatorPhase,
    next_tick: Option<Instant>,
    interval: Duration,
}

impl Default for TypingAnimator {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl TypingAnimator {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            phase: AnimatorPhase::Idle,
            next_tick: None,
            interval,
        }
    }

    #[must_use]
    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, AnimatorPhase::Animating { .. })
    }

    /// `Idle -> Animating(0)`. Returns `false` (and changes nothing) when the
    /// animator is already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_animating() {
            return false;
        }
        self.phase = AnimatorPhase::Animating { active: 0 };
        self.next_tick = Some(now + self.interval);
        true
    }

    /// Any state -> `Idle`. Returns whether the animator was running.
    pub fn stop(&mut self) -> bool {
        let was_animating = self.is_animating();
        self.phase = AnimatorPhase::Idle;
        self.next_tick = None;
        was_animating
    }

    #[must_use]
    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Advance by one step if a tick is due. A late poll advances once and
    /// reschedules from `now` rather than replaying missed ticks.
    pub fn poll(&mut self, now: Instant) -> Option<DotFrame> {
        let due = self.next_tick?;
        if now < due {
            return None;
        }
        let AnimatorPhase::Animating { active } = self.phase else {
            self.next_tick = None;
            return None;
        };

        let active = (active + 1) % DOT_COUNT;
        self.phase = AnimatorPhase::Animating { active };
        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_tick = Some(next);
        Some(DotFrame { active })
    }
}
