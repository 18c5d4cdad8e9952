pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod settings;
pub mod source;
pub mod state;
pub mod table;
pub mod view;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::state::AppState;

pub async fn run() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("axura_client_lib=info,axura_store=warn,warn")
    });

    // Command output goes to stdout; keep logs on stderr.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    tracing::debug!(?config, "Loaded configuration");

    let state = AppState::open(config)?;
    let output = commands::dispatch(&state, cli.command).await?;
    println!("{output}");

    Ok(())
}
