// MessageStore over a real transcript file.

use chrono::Utc;
use legal_guru::transcript::{FileMedium, Message, MessageKind, MessageStore, Sender};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::fs;

fn append(store: &MessageStore, sender: Sender, text: &str) {
    let now = Utc::now();
    store
        .append(Message::new(store.next_id(now), sender, text, now))
        .unwrap();
}

#[test]
fn file_holds_a_pretty_json_array_in_transcript_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    let store = MessageStore::new(FileMedium::new(&path));
    append(&store, Sender::User, "hello");
    append(&store, Sender::Assistant, "hi there");

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n"));
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["sender"], "user");
    assert_eq!(entries[1]["sender"], "bot");
    assert_eq!(entries[1]["message"], "hi there");
    assert!(entries[0]["time"].as_str().unwrap().ends_with('Z'));
    assert!(entries[0].get("kind").is_none());
}

#[test]
fn many_appends_round_trip_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    let store = MessageStore::new(FileMedium::new(&path));
    for i in 0..25 {
        let sender = if i % 2 == 0 {
            Sender::User
        } else {
            Sender::Assistant
        };
        append(&store, sender, &format!("message {i}"));
    }

    let loaded = MessageStore::new(FileMedium::new(&path)).load();
    let texts: Vec<String> = loaded.iter().map(|m| m.text.clone()).collect();
    let expected: Vec<String> = (0..25).map(|i| format!("message {i}")).collect();
    assert_eq!(texts, expected);
    assert!(loaded.is_sorted_by_key(|m| m.created_at));
}

#[test]
fn rapid_ids_are_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let store = MessageStore::new(FileMedium::new(dir.path().join("messages.json")));
    let now = Utc::now();
    let ids: HashSet<String> = (0..1000).map(|_| store.next_id(now).to_string()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn corrupt_file_is_backed_up_and_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    fs::write(&path, "[{\"id\": \"1_1\", \"sender\": ").unwrap();

    let store = MessageStore::new(FileMedium::new(&path));
    assert!(store.load().is_empty());

    let backups: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("messages.json.corrupt-")
        })
        .collect();
    assert_eq!(backups.len(), 1);

    append(&store, Sender::User, "after corruption");
    let loaded = MessageStore::new(FileMedium::new(&path)).load();
    assert_eq!(loaded.len(), 1);
}

#[test]
fn legacy_file_with_naive_times_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    fs::write(
        &path,
        r#"[
  {
    "id": "1715000000000_1",
    "sender": "bot",
    "message": "Hello! I'm LegalGuru.",
    "time": "2024-05-06T12:30:45.123456"
  },
  {
    "id": "1715000000500_2",
    "sender": "user",
    "message": "What is bail?",
    "time": "2024-05-06T12:31:02.000001"
  }
]"#,
    )
    .unwrap();

    let store = MessageStore::new(FileMedium::new(&path));
    let loaded = store.load();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].text, "What is bail?");
    assert_eq!(loaded[0].kind, MessageKind::Reply);
    assert_eq!(store.next_id(Utc::now()).sequence(), Some(3));
}

#[test]
fn clear_leaves_an_empty_array_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    let store = MessageStore::new(FileMedium::new(&path));
    append(&store, Sender::User, "hello");
    store.clear();

    let raw = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!([]));
}
