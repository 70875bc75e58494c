// Full-frame rendering through ratatui's TestBackend.

use legal_guru::config::Variant;
use legal_guru::session::{DotFrame, RenderEvent};
use legal_guru::transcript::{Message, MessageId, Sender};
use pretty_assertions::assert_eq;

use crate::helpers::{ScriptedGateway, render_frame_to_string, test_app};

fn message(seq: u64, sender: Sender, text: &str) -> Message {
    Message::new(MessageId::new(0, seq), sender, text, chrono::Utc::now())
}

#[tokio::test]
async fn first_frame_shows_header_welcome_and_placeholder() {
    let mut app = test_app(ScriptedGateway::new([]), Variant::Assistant);
    app.session.bootstrap(false);
    app.drain_render_events();

    let frame = render_frame_to_string(&mut app, 100, 24);
    assert!(frame.contains("LegalGuru  │  AI Legal Assistant"), "{frame}");
    assert!(frame.contains("Ctrl+L clear chat"));
    assert!(frame.contains("Hello! I'm LegalGuru."));
    assert!(frame.contains("Type a message..."));
}

#[tokio::test]
async fn personal_variant_uses_its_own_subtitle_and_greeting() {
    let mut app = test_app(ScriptedGateway::new([]), Variant::Personal);
    app.session.bootstrap(false);
    app.drain_render_events();

    let frame = render_frame_to_string(&mut app, 120, 30);
    assert!(frame.contains("Your Personal Legal Assistant"));
    assert!(frame.contains("your personal legal assistant"));
}

#[tokio::test]
async fn user_text_is_right_of_assistant_text() {
    let mut app = test_app(ScriptedGateway::new([]), Variant::Assistant);
    let question = message(1, Sender::User, "my question");
    let answer = message(2, Sender::Assistant, "my answer");
    app.apply_render_event(RenderEvent::Appended(question));
    app.apply_render_event(RenderEvent::Appended(answer));

    let frame = render_frame_to_string(&mut app, 100, 24);
    let column = |needle: &str| {
        frame
            .lines()
            .find_map(|line| line.find(needle))
            .unwrap_or_else(|| panic!("{needle} missing:\n{frame}"))
    };
    assert!(column("my question") > column("my answer"));
    assert!(frame.contains("You"));
}

#[tokio::test]
async fn typing_dots_render_while_waiting() {
    let mut app = test_app(ScriptedGateway::new([]), Variant::Assistant);
    app.apply_render_event(RenderEvent::TypingStarted);
    app.apply_render_event(RenderEvent::TypingFrame(DotFrame { active: 2 }));

    let frame = render_frame_to_string(&mut app, 80, 20);
    assert!(frame.contains(" • • • "), "{frame}");

    app.apply_render_event(RenderEvent::TypingStopped);
    let frame = render_frame_to_string(&mut app, 80, 20);
    assert!(!frame.contains('•'));
}

#[tokio::test]
async fn long_history_autoscrolls_to_latest() {
    let mut app = test_app(ScriptedGateway::new([]), Variant::Assistant);
    for i in 0..30 {
        let note = message(i, Sender::Assistant, &format!("note {i}"));
        app.apply_render_event(RenderEvent::Appended(note));
    }

    let frame = render_frame_to_string(&mut app, 80, 20);
    assert!(frame.contains("note 29"));
    assert!(!frame.contains("note 0 "));
    assert!(app.auto_scroll);
    assert!(app.scroll_offset > 0);
}

#[tokio::test]
async fn scrolling_up_reveals_older_messages() {
    let mut app = test_app(ScriptedGateway::new([]), Variant::Assistant);
    for i in 0..30 {
        let note = message(i, Sender::Assistant, &format!("note {i}"));
        app.apply_render_event(RenderEvent::Appended(note));
    }
    render_frame_to_string(&mut app, 80, 20);

    app.scroll_up(usize::MAX);
    let frame = render_frame_to_string(&mut app, 80, 20);
    assert!(frame.contains("note 0"));
    assert_eq!(app.scroll_offset, 0);
    assert!(!app.auto_scroll);
}

#[tokio::test]
async fn tiny_terminal_still_renders() {
    let mut app = test_app(ScriptedGateway::new([]), Variant::Assistant);
    app.apply_render_event(RenderEvent::Appended(message(1, Sender::User, "hello")));
    let frame = render_frame_to_string(&mut app, 12, 5);
    assert_eq!(frame.lines().count(), 5);
}
