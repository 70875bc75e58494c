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

mod events;
mod input;
mod state;

pub use events::{handle_key, handle_terminal_event, handle_terminal_input};
pub use input::InputState;
pub use state::App;

use crossterm::event::{
    EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use futures::{FutureExt as _, StreamExt};
use std::time::Instant;

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App, fresh: bool) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Bracketed paste and mouse wheel; ignore unsupported terminals
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::EnableBracketedPaste,
        crossterm::event::EnableMouseCapture,
        // Shift+Enter is only distinguishable from Enter with the enhanced protocol
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
        )
    );

    app.session.bootstrap(fresh);
    app.drain_render_events();
    terminal.draw(|f| crate::ui::render(f, app))?;

    let mut events = EventStream::new();

    loop {
        // Phase 1: wait for a key, a completion or the next typing tick
        let tick_at = app.session.next_tick();
        tokio::select! {
            input = events.next() => {
                events::handle_terminal_input(app, input);
            }
            event = app.session.next_gateway_event() => {
                app.session.on_gateway_event(event);
            }
            () = sleep_until(tick_at) => {
                app.session.tick(Instant::now());
            }
        }

        // Phase 2: drain queued terminal input so typing stays responsive
        while let Some(Some(Ok(event))) = events.next().now_or_never() {
            events::handle_terminal_event(app, event);
        }
        app.drain_render_events();

        if app.should_quit {
            break;
        }

        // Phase 3: render once
        terminal.draw(|f| crate::ui::render(f, app))?;
    }

    app.session.shutdown();
    tracing::info!("session closed");

    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableBracketedPaste,
        crossterm::event::DisableMouseCapture,
        PopKeyboardEnhancementFlags
    );
    ratatui::restore();

    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}
