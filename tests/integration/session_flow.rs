// End-to-end turns through SessionController: user query in, persisted
// messages and render events out.

use legal_guru::gateway::GatewayError;
use legal_guru::session::{
    DotFrame, PLACEHOLDER, RejectReason, RenderEvent, SubmitOutcome, TICK_INTERVAL,
};
use legal_guru::transcript::{
    FileMedium, MemoryMedium, Message, MessageKind, MessageStore, Sender,
};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

use crate::helpers::{GatedGateway, ScriptedGateway, harness};

fn texts(messages: &[Message]) -> Vec<(Sender, String)> {
    messages
        .iter()
        .map(|m| (m.sender, m.text.clone()))
        .collect()
}

#[tokio::test]
async fn conversation_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    let gateway = ScriptedGateway::new([Ok("hi there".to_owned())]);
    let mut h = harness(gateway, FileMedium::new(&path), "");

    h.session.submit("hello");
    h.settle().await;
    // no reply scripted for the second query; only the user message matters here
    h.session.submit("thanks");

    let reopened = MessageStore::new(FileMedium::new(&path)).load();
    assert_eq!(
        texts(&reopened),
        vec![
            (Sender::User, "hello".to_owned()),
            (Sender::Assistant, "hi there".to_owned()),
            (Sender::User, "thanks".to_owned()),
        ]
    );
}

#[tokio::test]
async fn timeout_is_recorded_as_error_reply() {
    let gateway = ScriptedGateway::new([Err(GatewayError::Timeout)]);
    let mut h = harness(gateway, MemoryMedium::new(), "");

    h.session.submit("is this legal?");
    h.settle().await;

    let stored = h.store.load();
    let reply = stored.last().unwrap();
    assert_eq!(reply.sender, Sender::Assistant);
    assert!(reply.text.starts_with("Error:"), "{}", reply.text);
    assert_eq!(reply.kind, MessageKind::Error);
    assert!(!h.session.is_busy());
}

#[tokio::test]
async fn clear_empties_a_five_message_transcript_before_reseeding() {
    let medium = MemoryMedium::new();
    let seed = MessageStore::new(medium.clone());
    for i in 0..5 {
        let now = chrono::Utc::now();
        seed.append(Message::new(
            seed.next_id(now),
            Sender::User,
            format!("m{i}"),
            now,
        ))
        .unwrap();
    }

    let mut h = harness(ScriptedGateway::new([]), medium.clone(), "");
    h.session.bootstrap(false);
    assert_eq!(h.store.load().len(), 5);

    h.session.clear();
    assert!(MessageStore::new(medium).load().is_empty());
}

#[tokio::test]
async fn clear_greets_again_with_the_configured_welcome() {
    let gateway = ScriptedGateway::new([Ok("reply".to_owned())]);
    let mut h = harness(gateway, MemoryMedium::new(), "Namaste!");
    h.session.bootstrap(false);
    h.session.submit("question");
    h.settle().await;
    assert_eq!(h.store.load().len(), 3);

    h.session.clear();
    let stored = h.store.load();
    assert_eq!(
        texts(&stored),
        vec![(Sender::Assistant, "Namaste!".to_owned())]
    );
}

#[tokio::test]
async fn query_reaches_gateway_trimmed() {
    let gateway = ScriptedGateway::new([Ok("ok".to_owned())]);
    let mut h = harness(gateway.clone(), MemoryMedium::new(), "");
    h.session.submit("  what is an FIR?\n");
    h.settle().await;
    assert_eq!(gateway.queries(), vec!["what is an FIR?".to_owned()]);
}

#[tokio::test]
async fn placeholder_and_blank_input_never_reach_the_gateway() {
    let gateway = ScriptedGateway::new([]);
    let mut h = harness(gateway.clone(), MemoryMedium::new(), "");

    assert_eq!(
        h.session.submit(PLACEHOLDER),
        SubmitOutcome::Rejected(RejectReason::Placeholder)
    );
    assert_eq!(
        h.session.submit(" \t "),
        SubmitOutcome::Rejected(RejectReason::Empty)
    );

    tokio::task::yield_now().await;
    assert!(gateway.queries().is_empty());
    assert!(h.store.load().is_empty());
}

#[tokio::test]
async fn only_one_request_in_flight() {
    let gateway = GatedGateway::new("first reply");
    let mut h = harness(gateway.clone(), MemoryMedium::new(), "");

    assert_eq!(h.session.submit("one"), SubmitOutcome::Sent);
    assert_eq!(
        h.session.submit("two"),
        SubmitOutcome::Rejected(RejectReason::Busy)
    );

    gateway.release();
    h.settle().await;
    assert_eq!(h.session.submit("three"), SubmitOutcome::Sent);

    let users: Vec<String> = h
        .store
        .load()
        .into_iter()
        .filter(|m| m.sender == Sender::User)
        .map(|m| m.text)
        .collect();
    assert_eq!(users, vec!["one".to_owned(), "three".to_owned()]);
}

#[tokio::test]
async fn reply_to_a_cleared_turn_never_lands() {
    let gateway = GatedGateway::new("too late");
    let mut h = harness(gateway.clone(), MemoryMedium::new(), "");

    h.session.submit("question");
    h.session.clear();
    gateway.release();

    let arrived =
        tokio::time::timeout(Duration::from_millis(100), h.session.next_gateway_event()).await;
    assert!(arrived.is_err(), "cancelled request still produced a reply");
    assert!(h.store.load().is_empty());
    assert!(!h.session.is_busy());
}

#[tokio::test]
async fn typing_indicator_runs_only_while_waiting() {
    let gateway = GatedGateway::new("answer");
    let mut h = harness(gateway.clone(), MemoryMedium::new(), "");

    h.session.submit("question");
    let started = Instant::now();
    h.session.tick(started + TICK_INTERVAL);
    h.session.tick(started + TICK_INTERVAL * 2);

    gateway.release();
    h.settle().await;
    h.session.tick(started + TICK_INTERVAL * 10);

    let events = h.render_events();
    let kinds: Vec<&str> = events
        .iter()
        .map(|e| match e {
            RenderEvent::Appended(_) => "appended",
            RenderEvent::Cleared => "cleared",
            RenderEvent::TypingStarted => "started",
            RenderEvent::TypingFrame(_) => "frame",
            RenderEvent::TypingStopped => "stopped",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "appended", "started", "frame", "frame", "stopped", "appended"
        ]
    );
    assert_eq!(events[2], RenderEvent::TypingFrame(DotFrame { active: 1 }));
    assert_eq!(events[3], RenderEvent::TypingFrame(DotFrame { active: 2 }));
    assert_eq!(h.session.next_tick(), None);
}

#[tokio::test]
async fn bootstrap_restores_history_without_greeting() {
    let medium = MemoryMedium::new();
    let gateway = ScriptedGateway::new([Ok("hi".to_owned())]);
    let mut first = harness(gateway, medium.clone(), "Welcome");
    first.session.bootstrap(false);
    first.session.submit("hello");
    first.settle().await;
    drop(first);

    let mut second = harness(ScriptedGateway::new([]), medium, "Welcome");
    second.session.bootstrap(false);
    let restored: Vec<Message> = second
        .render_events()
        .into_iter()
        .filter_map(|e| match e {
            RenderEvent::Appended(m) => Some(m),
            _ => None,
        })
        .collect();
    assert_eq!(
        texts(&restored),
        vec![
            (Sender::Assistant, "Welcome".to_owned()),
            (Sender::User, "hello".to_owned()),
            (Sender::Assistant, "hi".to_owned()),
        ]
    );
}

#[tokio::test]
async fn fresh_start_discards_history() {
    let medium = MemoryMedium::new();
    let gateway = ScriptedGateway::new([Ok("hi".to_owned())]);
    let mut first = harness(gateway, medium.clone(), "Welcome");
    first.session.submit("hello");
    first.settle().await;

    let mut second = harness(ScriptedGateway::new([]), medium, "Welcome");
    second.session.bootstrap(true);
    assert_eq!(
        texts(&second.store.load()),
        vec![(Sender::Assistant, "Welcome".to_owned())]
    );
}

#[tokio::test]
async fn ids_stay_unique_across_sessions_on_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");

    for round in 0..3 {
        let gateway = ScriptedGateway::new([Ok(format!("reply {round}"))]);
        let mut h = harness(gateway, FileMedium::new(&path), "");
        h.session.bootstrap(false);
        h.session.submit(&format!("query {round}"));
        h.settle().await;
    }

    let stored = MessageStore::new(FileMedium::new(&path)).load();
    let mut ids: Vec<String> = stored.iter().map(|m| m.id.to_string()).collect();
    assert_eq!(ids.len(), 6);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 6);
}
