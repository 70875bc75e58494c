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

use super::ids::{IdGenerator, MessageId};
use super::medium::TranscriptMedium;
use super::message::Message;
use super::Transcript;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("transcript I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("transcript could not be encoded: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("message id {0} is already in the transcript")]
    DuplicateId(MessageId),
}

/// Ordered message log persisted as one JSON array.
///
/// Every mutation rewrites the whole array, so an append costs O(transcript
/// length). Fine for a single chat session; a long-lived log would want an
/// append-only format instead.
pub struct MessageStore {
    medium: Mutex<Box<dyn TranscriptMedium>>,
    ids: IdGenerator,
}

impl MessageStore {
    pub fn new(medium: impl TranscriptMedium + 'static) -> Self {
        Self {
            medium: Mutex::new(Box::new(medium)),
            ids: IdGenerator::new(),
        }
    }

    pub fn next_id(&self, now: DateTime<Utc>) -> MessageId {
        self.ids.next(now)
    }

    /// Read the persisted transcript. Missing, unreadable or malformed data
    /// yields an empty transcript; malformed data is quarantined first.
    pub fn load(&self) -> Transcript {
        let mut medium = self.lock();
        self.load_locked(medium.as_mut()).unwrap_or_else(|err| {
            tracing::warn!("transcript unreadable, starting empty: {err}");
            Vec::new()
        })
    }

    /// Append `message` and rewrite the persisted transcript. Returns the
    /// message as stored, with `created_at` raised to the previous message's
    /// time if the clock went backwards.
    ///
    /// A transcript that cannot be read is left untouched and the read error
    /// is returned.
    pub fn append(&self, mut message: Message) -> Result<Message, StorageError> {
        let mut medium = self.lock();
        let mut transcript = self.load_locked(medium.as_mut())?;

        if transcript.iter().any(|m| m.id == message.id) {
            return Err(StorageError::DuplicateId(message.id));
        }
        if let Some(last) = transcript.last()
            && message.created_at < last.created_at
        {
            message.created_at = last.created_at;
        }

        self.ids.observe(&message.id);
        tracing::debug!(id = %message.id, sender = ?message.sender, "appending message");
        transcript.push(message.clone());
        write_transcript(medium.as_mut(), &transcript)?;
        Ok(message)
    }

    /// Reset the persisted transcript to `[]`. Failures are logged only.
    pub fn clear(&self) {
        let mut medium = self.lock();
        if let Err(err) = write_transcript(medium.as_mut(), &[]) {
            tracing::warn!("failed to clear transcript: {err}");
        } else {
            tracing::info!("transcript cleared");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn TranscriptMedium>> {
        self.medium.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_locked(&self, medium: &mut dyn TranscriptMedium) -> io::Result<Transcript> {
        let Some(bytes) = medium.read()? else {
            tracing::debug!("no persisted transcript yet");
            return Ok(Vec::new());
        };

        match decode(&bytes) {
            Ok(transcript) => {
                for message in &transcript {
                    self.ids.observe(&message.id);
                }
                Ok(transcript)
            }
            Err(reason) => {
                match medium.quarantine() {
                    Ok(Some(backup)) => {
                        tracing::warn!("transcript invalid ({reason}); backed up to {backup}");
                    }
                    Ok(None) => tracing::warn!("transcript invalid ({reason}); nothing to back up"),
                    Err(err) => {
                        tracing::warn!("transcript invalid ({reason}); backup failed: {err}");
                        return Err(err);
                    }
                }
                Ok(Vec::new())
            }
        }
    }
}

fn decode(bytes: &[u8]) -> Result<Transcript, String> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let transcript: Transcript = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    let mut seen = HashSet::with_capacity(transcript.len());
    for message in &transcript {
        if !seen.insert(&message.id) {
            return Err(format!("duplicate id {}", message.id));
        }
    }
    Ok(transcript)
}

fn write_transcript(
    medium: &mut dyn TranscriptMedium,
    transcript: &[Message],
) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(transcript)?;
    medium.write(&bytes)?;
    Ok(())
}
