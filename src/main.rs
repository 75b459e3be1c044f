//! NPS Explorer - Browse US national park sites from the terminal
//!
//! Scrapes nps.gov for the sites in a chosen state and lists places near a
//! selected site using the MapQuest search API. Every response is cached on
//! disk so repeat lookups work without the network.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nps_explorer::cache::CacheStore;
use nps_explorer::cli::{Cli, StartupConfig};
use nps_explorer::data::{PlacesClient, SiteDirectory};
use nps_explorer::fetch::{Dispatcher, HttpTransport};
use nps_explorer::session::Session;

/// Initialize the tracing subscriber for logging
///
/// Logs go to stderr so they never interleave with prompts. Use RUST_LOG to
/// raise the level (e.g., RUST_LOG=debug shows cache hits and misses).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .with(filter)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    let config = StartupConfig::from_cli(&cli)?;
    info!(cache = %config.cache_path.display(), "NPS Explorer starting");

    let transport = match config.timeout {
        Some(timeout) => HttpTransport::with_timeout(timeout)?,
        None => HttpTransport::new(),
    };
    let mut dispatcher = Dispatcher::with_transport(CacheStore::load(&config.cache_path), transport);

    let directory = SiteDirectory::new();
    let index = directory.build_state_index(&mut dispatcher).await?;
    info!(states = index.len(), "State index built");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        stdin.lock(),
        stdout.lock(),
        dispatcher,
        directory,
        PlacesClient::new(config.api_key),
        index,
    );
    session.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
