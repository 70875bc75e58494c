use async_trait::async_trait;
use legal_guru::app::App;
use legal_guru::config::Variant;
use legal_guru::gateway::{GatewayError, ResponseGateway};
use legal_guru::session::{RenderEvent, SessionController};
use legal_guru::transcript::{MemoryMedium, MessageStore, TranscriptMedium};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, mpsc};

/// Replies from a fixed script, one per call, and records every query.
/// An exhausted script answers with `EmptyReply`.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new(replies: impl IntoIterator<Item = Result<String, GatewayError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            queries: Mutex::default(),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResponseGateway for ScriptedGateway {
    async fn complete(&self, user_query: &str) -> Result<String, GatewayError> {
        self.queries.lock().unwrap().push(user_query.to_owned());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayError::EmptyReply))
    }
}

/// Holds every request until `release` is called, then answers `reply`.
pub struct GatedGateway {
    pub gate: Notify,
    reply: String,
}

impl GatedGateway {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            gate: Notify::new(),
            reply: reply.to_owned(),
        })
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ResponseGateway for GatedGateway {
    async fn complete(&self, _user_query: &str) -> Result<String, GatewayError> {
        self.gate.notified().await;
        Ok(self.reply.clone())
    }
}

pub struct Harness {
    pub session: SessionController,
    pub store: Arc<MessageStore>,
    pub render_rx: mpsc::UnboundedReceiver<RenderEvent>,
}

pub fn harness(
    gateway: Arc<dyn ResponseGateway>,
    medium: impl TranscriptMedium + 'static,
    welcome: &str,
) -> Harness {
    let store = Arc::new(MessageStore::new(medium));
    let (tx, render_rx) = mpsc::unbounded_channel();
    let session = SessionController::new(Arc::clone(&store), gateway, welcome, tx);
    Harness {
        session,
        store,
        render_rx,
    }
}

impl Harness {
    /// Wait for the in-flight completion and feed it back to the session.
    pub async fn settle(&mut self) {
        let event = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            self.session.next_gateway_event(),
        )
        .await
            .expect("completion did not arrive");
        self.session.on_gateway_event(event);
    }

    pub fn render_events(&mut self) -> Vec<RenderEvent> {
        std::iter::from_fn(|| self.render_rx.try_recv().ok()).collect()
    }
}

/// Build an `App` over an in-memory transcript.
pub fn test_app(gateway: Arc<dyn ResponseGateway>, variant: Variant) -> App {
    let Harness {
        session, render_rx, ..
    } = harness(gateway, MemoryMedium::new(), variant.welcome());
    App::new(session, render_rx, variant)
}

pub fn render_frame_to_string(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| legal_guru::ui::render(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
