//! # Tipcast — daily tip dispatcher
//!
//! Invoked by an external scheduler (cron, GitHub Actions) at most once
//! per desired interval. Each run picks up wherever the last one stopped:
//! same day resumes pending deliveries, a new day selects a fresh tip.
//!
//! Usage:
//!   tipcast                                  # default data paths
//!   tipcast --catalog data/tips.json --state data/dispatch_state.json
//!   tipcast --hashed                         # digest-only state file
//!
//! Environment: TELEGRAM_TOKEN (bot credential), TELEGRAM_CHAT_ID
//! (comma-separated recipient chat ids).

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tipcast_channels::{TelegramConfig, TelegramTransport};
use tipcast_core::{Config, Result, TipcastError, TrackingMode};
use tipcast_dispatch::{Controller, RunOutcome};

// Exit codes: 0 = success (including drained and partial progress),
// 1 = data store error, 2 = configuration error.
const EXIT_DATA: i32 = 1;
const EXIT_CONFIG: i32 = 2;

#[derive(Parser)]
#[command(
    name = "tipcast",
    version,
    about = "📨 Tipcast — delivers one unpublished tip per day to every recipient"
)]
struct Cli {
    /// Tip catalog JSON file
    #[arg(long, default_value = "data/tips.json")]
    catalog: PathBuf,

    /// Dispatch state JSON file
    #[arg(long, default_value = "data/dispatch_state.json")]
    state: PathBuf,

    /// Persist recipient digests instead of raw chat ids
    #[arg(long)]
    hashed: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

async fn run(cli: Cli) -> Result<RunOutcome> {
    let tracking = if cli.hashed {
        TrackingMode::Hashed
    } else {
        TrackingMode::Raw
    };
    let config = Config::from_env(cli.catalog, cli.state, tracking)?;
    tracing::info!("📨 Dispatching to {} recipient(s)", config.recipients.len());

    let transport = TelegramTransport::new(TelegramConfig::new(config.bot_token.clone()));
    let mut controller = Controller::new(config, Box::new(transport));
    controller.run().await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "tipcast=debug,tipcast_dispatch=debug,tipcast_channels=debug"
    } else {
        "tipcast=info,tipcast_dispatch=info,tipcast_channels=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(outcome) => {
            tracing::info!("Run finished: {outcome}");
        }
        Err(e @ TipcastError::Config(_)) => {
            tracing::error!("{e}");
            std::process::exit(EXIT_CONFIG);
        }
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(EXIT_DATA);
        }
    }
}
