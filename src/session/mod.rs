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

//! Turn orchestration: user input in, persisted messages and render events out.

mod animator;

pub use animator::{AnimatorPhase, DOT_COUNT, DotFrame, TICK_INTERVAL, TypingAnimator};

use crate::gateway::{GatewayError, ResponseGateway};
use crate::transcript::{Message, MessageStore, Sender};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Sentinel text of the empty input box; never sent as a query.
pub const PLACEHOLDER: &str = "Type a message...";

/// What the UI needs to know to redraw. Emitted in the order the UI should
/// apply them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Appended(Message),
    Cleared,
    TypingStarted,
    TypingFrame(DotFrame),
    TypingStopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    Placeholder,
    /// A reply for the previous query is still outstanding.
    Busy,
}

/// Completion result tagged with the turn it answers.
#[derive(Debug)]
pub struct GatewayEvent {
    pub turn: u64,
    pub result: Result<String, GatewayError>,
}

struct InFlight {
    turn: u64,
    cancel: CancellationToken,
}

pub struct SessionController {
    store: Arc<MessageStore>,
    gateway: Arc<dyn ResponseGateway>,
    animator: TypingAnimator,
    render_tx: mpsc::UnboundedSender<RenderEvent>,
    reply_tx: mpsc::UnboundedSender<GatewayEvent>,
    reply_rx: mpsc::UnboundedReceiver<GatewayEvent>,
    in_flight: Option<InFlight>,
    next_turn: u64,
    welcome: String,
}

impl SessionController {
    pub fn new(
        store: Arc<MessageStore>,
        gateway: Arc<dyn ResponseGateway>,
        welcome: impl Into<String>,
        render_tx: mpsc::UnboundedSender<RenderEvent>,
    ) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            store,
            gateway,
            animator: TypingAnimator::default(),
            render_tx,
            reply_tx,
            reply_rx,
            in_flight: None,
            next_turn: 0,
            welcome: welcome.into(),
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn animator(&self) -> &TypingAnimator {
        &self.animator
    }

    /// Restore the persisted transcript (or wipe it when `fresh`) and greet
    /// the user if nothing is left.
    pub fn bootstrap(&mut self, fresh: bool) {
        if fresh {
            self.store.clear();
        }
        let transcript = self.store.load();
        tracing::info!(messages = transcript.len(), fresh, "session restored");
        let empty = transcript.is_empty();
        for message in transcript {
            self.emit(RenderEvent::Appended(message));
        }
        if empty {
            self.seed_welcome();
        }
    }

    /// Record the user's query and start one completion request.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let query = text.trim();
        if query.is_empty() {
            return SubmitOutcome::Rejected(RejectReason::Empty);
        }
        if query == PLACEHOLDER {
            return SubmitOutcome::Rejected(RejectReason::Placeholder);
        }
        if self.is_busy() {
            tracing::debug!("submit ignored: reply still pending");
            return SubmitOutcome::Rejected(RejectReason::Busy);
        }

        let now = Utc::now();
        self.record(Message::new(
            self.store.next_id(now),
            Sender::User,
            query,
            now,
        ));

        if self.animator.start(Instant::now()) {
            self.emit(RenderEvent::TypingStarted);
        }

        self.next_turn += 1;
        let turn = self.next_turn;
        let cancel = CancellationToken::new();
        self.in_flight = Some(InFlight {
            turn,
            cancel: cancel.clone(),
        });

        let gateway = Arc::clone(&self.gateway);
        let reply_tx = self.reply_tx.clone();
        let query = query.to_owned();
        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::debug!(turn, "completion request cancelled");
                    return;
                }
                result = gateway.complete(&query) => result,
            };
            if reply_tx.send(GatewayEvent { turn, result }).is_err() {
                tracing::debug!(turn, "session gone before reply arrived");
            }
        });

        tracing::info!(turn, "query submitted");
        SubmitOutcome::Sent
    }

    /// Wait for the next completion result. Pending forever when nothing is
    /// in flight, which makes it safe to use as a `select!` branch.
    pub async fn next_gateway_event(&mut self) -> GatewayEvent {
        match self.reply_rx.recv().await {
            Some(event) => event,
            // The controller owns a sender, so the channel never closes.
            None => std::future::pending().await,
        }
    }

    pub fn on_gateway_event(&mut self, event: GatewayEvent) {
        let current = self.in_flight.as_ref().map(|flight| flight.turn);
        if current != Some(event.turn) {
            tracing::debug!(turn = event.turn, ?current, "dropping stale completion");
            return;
        }
        self.in_flight = None;

        if self.animator.stop() {
            self.emit(RenderEvent::TypingStopped);
        }

        let now = Utc::now();
        let id = self.store.next_id(now);
        let message = match event.result {
            Ok(reply) => Message::new(id, Sender::Assistant, reply, now),
            Err(err) => {
                tracing::warn!(turn = event.turn, class = ?err.class(), "completion failed: {err}");
                Message::error(id, format!("Error: {err}"), now)
            }
        };
        self.record(message);
    }

    /// Advance the typing indicator if a tick is due.
    pub fn tick(&mut self, now: Instant) {
        if let Some(frame) = self.animator.poll(now) {
            self.emit(RenderEvent::TypingFrame(frame));
        }
    }

    #[must_use]
    pub fn next_tick(&self) -> Option<Instant> {
        self.animator.next_tick()
    }

    /// Drop any pending reply, wipe the transcript and greet again.
    pub fn clear(&mut self) {
        self.cancel_in_flight();
        if self.animator.stop() {
            self.emit(RenderEvent::TypingStopped);
        }
        self.emit(RenderEvent::Cleared);
        self.store.clear();
        self.seed_welcome();
    }

    pub fn shutdown(&mut self) {
        self.cancel_in_flight();
        self.animator.stop();
    }

    fn cancel_in_flight(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            tracing::debug!(turn = flight.turn, "cancelling pending completion");
            flight.cancel.cancel();
        }
    }

    fn seed_welcome(&self) {
        if self.welcome.trim().is_empty() {
            return;
        }
        let now = Utc::now();
        self.record(Message::new(
            self.store.next_id(now),
            Sender::Assistant,
            self.welcome.clone(),
            now,
        ));
    }

    fn record(&self, message: Message) {
        let shown = match self.store.append(message.clone()) {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(id = %message.id, "message not persisted: {err}");
                message
            }
        };
        self.emit(RenderEvent::Appended(shown));
    }

    fn emit(&self, event: RenderEvent) {
        if self.render_tx.send(event).is_err() {
            tracing::debug!("render channel closed");
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
