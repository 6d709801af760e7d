//! Hub Model-Listing Snapshot - Entry Point

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use hub_snapshot::config::{Config, api};
use hub_snapshot::{HubClient, snapshot};

#[derive(Parser, Debug)]
#[command(name = "hub-snapshot")]
#[command(about = "Snapshot the Hugging Face model listing into a local CSV dataset")]
#[command(version)]
struct Cli {
    /// Hub access token (optional, raises anonymous rate limits)
    #[arg(long, env = "HF_TOKEN")]
    token: Option<String>,

    /// Where to write the snapshot
    #[arg(long, default_value = api::OUTPUT_PATH)]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Progress lines belong on stdout; stderr stays quiet.
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stdout))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting hub snapshot");

    let mut config = Config::new(cli.token);
    config.output_path = cli.output;

    let output = config.output_path.clone();
    let client = HubClient::new(config)?;

    let snapshot = snapshot::run(&client, &output).await?;

    if !snapshot.stop.is_exhausted() {
        tracing::warn!("listing walk stopped early; snapshot is partial");
    }

    Ok(())
}
