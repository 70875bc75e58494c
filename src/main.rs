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

use clap::Parser;
use legal_guru::Cli;
use legal_guru::app::App;
use legal_guru::config::Settings;
use legal_guru::error::AppError;
use legal_guru::gateway::ChatCompletionsGateway;
use legal_guru::session::SessionController;
use legal_guru::transcript::{FileMedium, MessageStore};
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        if let Some(app_error) = extract_app_error(&err) {
            eprintln!("{}", app_error.user_message());
            std::process::exit(app_error.exit_code());
        }
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let settings = Settings::resolve(&cli)?;
    settings.prepare_storage()?;
    tracing::info!(
        endpoint = %settings.endpoint,
        model = %settings.model,
        variant = ?settings.variant,
        storage = %settings.storage.display(),
        timeout_secs = settings.timeout.as_secs(),
        "settings resolved"
    );
    if settings.api_key.is_none() {
        tracing::warn!("no API key configured; requests are sent unauthenticated");
    }

    let store = Arc::new(MessageStore::new(FileMedium::new(&settings.storage)));
    let gateway = ChatCompletionsGateway::new(
        &settings.endpoint,
        settings.model.clone(),
        settings.api_key.clone(),
        settings.system_instruction.clone(),
        settings.timeout,
    )
    .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let (render_tx, render_rx) = mpsc::unbounded_channel();
        let session = SessionController::new(
            store,
            Arc::new(gateway),
            settings.welcome_message.clone(),
            render_tx,
        );
        let mut app = App::new(session, render_rx, settings.variant);
        legal_guru::app::run_tui(&mut app, cli.fresh).await
    })
}

fn extract_app_error(err: &anyhow::Error) -> Option<AppError> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<AppError>().cloned())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_ref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!(
                "RUST_LOG is set, but tracing is disabled without --log-file <PATH>. \
Use --log-file to enable diagnostics."
            );
        }
        return Ok(());
    };

    let directives = cli
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(directives.as_str())
        .map_err(|e| anyhow::anyhow!("invalid tracing filter `{directives}`: {e}"))?;

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if cli.log_append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(
        target: "diagnostics",
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        log_filter = %directives,
        log_append = cli.log_append,
        "tracing enabled"
    );

    Ok(())
}
