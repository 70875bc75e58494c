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

//! Byte-oriented persistence behind the transcript store.

use std::fs;
use std::io::{self, Write as _};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

pub trait TranscriptMedium: Send {
    /// Current contents, or `None` when nothing has been persisted yet.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replace the contents as a whole.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Move unreadable contents aside before they get overwritten.
    /// Returns a description of where the backup went, if one was made.
    fn quarantine(&mut self) -> io::Result<Option<String>>;
}

/// Transcript file on disk. Writes go to a sibling temp file that is synced
/// and renamed over the target, so a crash leaves either the old or the new
/// transcript.
#[derive(Debug, Clone)]
pub struct FileMedium {
    path: PathBuf,
}

impl FileMedium {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TranscriptMedium for FileMedium {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.temp_path();
        let mut temp = fs::File::create(&temp_path)?;
        temp.write_all(bytes)?;
        temp.sync_all()?;
        drop(temp);
        fs::rename(&temp_path, &self.path)
    }

    fn quarantine(&mut self) -> io::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis());
        let mut name = self
            .path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_default();
        name.push(format!(".corrupt-{millis}"));
        let backup = self.path.with_file_name(name);
        fs::rename(&self.path, &backup)?;
        Ok(Some(backup.display().to_string()))
    }
}

/// In-process medium. Clones share the same buffer, which lets a test open a
/// second store over "the same file".
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
    bytes: Arc<Mutex<Option<Vec<u8>>>>,
    quarantined: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemoryMedium {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        let medium = Self::default();
        *medium.bytes.lock().unwrap_or_else(PoisonError::into_inner) = Some(bytes.into());
        medium
    }

    #[must_use]
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn quarantined(&self) -> Vec<Vec<u8>> {
        self.quarantined
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TranscriptMedium for MemoryMedium {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.contents())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        *self.bytes.lock().unwrap_or_else(PoisonError::into_inner) = Some(bytes.to_vec());
        Ok(())
    }

    fn quarantine(&mut self) -> io::Result<Option<String>> {
        let taken = self
            .bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(bytes) = taken else {
            return Ok(None);
        };
        let mut backups = self
            .quarantined
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        backups.push(bytes);
        Ok(Some(format!("memory backup #{}", backups.len())))
    }
}
