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

//! Durable, ordered chat transcript.
//!
//! `MessageStore` owns the transcript and persists it through a
//! `TranscriptMedium` as a single JSON array. Message ids come from a
//! store-scoped `IdGenerator` so they keep increasing across restarts.

pub mod ids;
pub mod medium;
mod message;
mod store;

pub use ids::{IdGenerator, MessageId};
pub use medium::{FileMedium, MemoryMedium, TranscriptMedium};
pub use message::{Message, MessageKind, Sender};
pub use store::{MessageStore, StorageError};

pub type Transcript = Vec<Message>;
