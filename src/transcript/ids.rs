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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Message identifier of the form `<unix-millis>_<sequence>`.
///
/// The sequence is the ordering key; the millisecond prefix only helps a
/// human reading the transcript file. Ids written by older builds use the
/// same shape, so they parse the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    #[must_use]
    pub fn new(millis: i64, sequence: u64) -> Self {
        Self(format!("{millis}_{sequence}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sequence number, or `None` for ids that don't follow the format.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        let tail = self
            .0
            .rsplit_once('_')
            .map_or(self.0.as_str(), |(_, seq)| seq);
        tail.parse().ok()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

/// Monotonic id source scoped to one store.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, now: DateTime<Utc>) -> MessageId {
        let sequence = self.last.fetch_add(1, Ordering::Relaxed) + 1;
        MessageId::new(now.timestamp_millis(), sequence)
    }

    /// Make sure future ids sort after `id`.
    pub fn observe(&self, id: &MessageId) {
        if let Some(sequence) = id.sequence() {
            self.last.fetch_max(sequence, Ordering::Relaxed);
        }
    }
}
