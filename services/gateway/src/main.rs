use anyhow::Context;
use clap::{ArgGroup, Parser};
use gateway::round::{run_round, Clock, RoundOptions, RoundStatus};
use gateway::setup::{resolve_token, setup_from_reactions};
use gateway::SlackClient;
use persistence::ConfigStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coffee-pairs")]
#[command(about = "Pair people up for 1:1 chats and announce the pairs on Slack")]
#[command(group(ArgGroup::new("mode").required(true).args(["run", "setup"])))]
struct Cli {
    /// Path to the config file
    #[arg(long, env = "COFFEE_PAIRS_CONFIG")]
    config: PathBuf,

    /// Make a pairing and post it to Slack
    #[arg(long)]
    run: bool,

    /// Read the participants from Slack reactions to the kickstart message
    #[arg(long)]
    setup: bool,

    /// Print the message to stdout instead of posting, and leave the config as is
    #[arg(long)]
    debug: bool,

    /// Only pair on scheduled dates
    #[arg(long)]
    respect_schedule: bool,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = ConfigStore::open(&cli.config);

    if cli.run {
        let options = RoundOptions {
            debug: cli.debug,
            respect_schedule: cli.respect_schedule,
        };

        let report = run_round(&store, Clock::now(), options)
            .await
            .with_context(|| format!("running round from {}", cli.config.display()))?;
        match report.status {
            RoundStatus::Announced => tracing::info!(saved = report.saved, "Round announced"),
            RoundStatus::Exhausted => tracing::warn!("Out of pairings"),
            RoundStatus::NotScheduled => tracing::info!("No round today"),
        }
    } else if cli.setup {
        let config = store
            .load()
            .with_context(|| format!("loading {}", cli.config.display()))?;
        let client = SlackClient::new(resolve_token(&config)?);
        let participants = setup_from_reactions(&store, &client).await?;
        tracing::info!(count = participants.len(), "Setup complete");
    }

    Ok(())
}
