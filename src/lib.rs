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

pub mod app;
pub mod bubble;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod transcript;
pub mod ui;

use clap::Parser;
use config::Variant;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "legal-guru",
    about = "Ask LegalGuru quick legal questions from your terminal"
)]
pub struct Cli {
    /// Settings file (defaults to <config dir>/legal-guru/settings.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Transcript file (defaults to <data dir>/legal-guru/messages.json)
    #[arg(long, value_name = "PATH")]
    pub storage: Option<PathBuf>,

    /// Base URL of the OpenAI-compatible completion endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Model requested from the completion endpoint
    #[arg(long, short)]
    pub model: Option<String>,

    /// Display preset (subtitle and welcome message)
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Start with an empty transcript instead of restoring the previous one
    #[arg(long)]
    pub fresh: bool,

    /// Request timeout in seconds for a single completion
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// API key forwarded as a bearer token
    #[arg(long, env = "TOGETHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Write tracing diagnostics to a file (disabled unless set)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives (e.g. `info,legal_guru=debug`)
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to `--log-file` instead of truncating on startup
    #[arg(long)]
    pub log_append: bool,
}
