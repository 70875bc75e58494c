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

use crate::Cli;
use crate::error::AppError;
use crate::gateway::prompt::SYSTEM_INSTRUCTION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR_NAME: &str = "legal-guru";
const SETTINGS_FILE: &str = "settings.json";
const TRANSCRIPT_FILE: &str = "messages.json";
const FALLBACK_STORAGE_DIR: &str = "chat_storage";

pub const DEFAULT_ENDPOINT: &str = "https://api.together.xyz/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Display preset: header subtitle and greeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Assistant,
    Personal,
}

impl Variant {
    #[must_use]
    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Assistant => "AI Legal Assistant",
            Self::Personal => "Your Personal Legal Assistant",
        }
    }

    #[must_use]
    pub fn welcome(self) -> &'static str {
        match self {
            Self::Assistant => {
                "Hello! I'm LegalGuru. How can I assist you with legal matters today?"
            }
            Self::Personal => {
                "Hello! I'm LegalGuru, your personal legal assistant. How can I help you today? \
                 Feel free to ask me any legal questions you might have."
            }
        }
    }
}

/// On-disk settings. Every field is optional; absent fields fall back to the
/// CLI or the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub variant: Option<Variant>,
    pub welcome_message: Option<String>,
    pub system_instruction: Option<String>,
    pub storage: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub variant: Variant,
    pub welcome_message: String,
    pub system_instruction: String,
    pub storage: PathBuf,
    pub timeout: Duration,
}

impl Settings {
    /// Precedence: CLI flags, then the settings file, then defaults.
    pub fn resolve(cli: &Cli) -> Result<Self, AppError> {
        let file = match &cli.config {
            Some(path) => read_settings_file(path)?.ok_or_else(|| {
                AppError::ConfigInvalid(format!("{} does not exist", path.display()))
            })?,
            None => match default_settings_path() {
                Some(path) => read_settings_file(&path)?.unwrap_or_default(),
                None => SettingsFile::default(),
            },
        };
        Self::from_parts(cli, file)
    }

    pub fn from_parts(cli: &Cli, file: SettingsFile) -> Result<Self, AppError> {
        let endpoint = cli
            .endpoint
            .clone()
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(AppError::ConfigInvalid(format!(
                "endpoint `{endpoint}` is not an http(s) URL"
            )));
        }

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::ConfigInvalid(
                "timeout must be at least one second".to_owned(),
            ));
        }

        let variant = cli.variant.or(file.variant).unwrap_or_default();
        Ok(Self {
            endpoint,
            model: cli
                .model
                .clone()
                .or(file.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            api_key: cli.api_key.clone(),
            variant,
            welcome_message: file
                .welcome_message
                .unwrap_or_else(|| variant.welcome().to_owned()),
            system_instruction: file
                .system_instruction
                .unwrap_or_else(|| SYSTEM_INSTRUCTION.to_owned()),
            storage: cli
                .storage
                .clone()
                .or(file.storage)
                .unwrap_or_else(default_storage_path),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Make sure the transcript's directory exists before the UI starts.
    pub fn prepare_storage(&self) -> Result<(), AppError> {
        if self.storage.is_dir() {
            return Err(AppError::StorageUnavailable(format!(
                "{} is a directory",
                self.storage.display()
            )));
        }
        if let Some(parent) = self.storage.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::StorageUnavailable(format!("{}: {e}", parent.display()))
            })?;
        }
        Ok(())
    }
}

fn read_settings_file(path: &Path) -> Result<Option<SettingsFile>, AppError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(AppError::ConfigInvalid(format!(
                "{}: {err}",
                path.display()
            )));
        }
    };
    let parsed = serde_json::from_str(&content)
        .map_err(|e| AppError::ConfigInvalid(format!("{}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "settings file loaded");
    Ok(Some(parsed))
}

#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE))
}

#[must_use]
pub fn default_storage_path() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(FALLBACK_STORAGE_DIR).join(TRANSCRIPT_FILE),
        |dir| dir.join(APP_DIR_NAME).join(TRANSCRIPT_FILE),
    )
}
