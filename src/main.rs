//! Main entry point for the transparency-data-downloader CLI

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use transparency_data_downloader::cli::{Cli, Commands};
use transparency_data_downloader::metrics::init_metrics;

/// Initialize tracing subscriber with optional JSON formatting
fn init_tracing() {
    let json_format = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("transparency_data_downloader=info"));

    if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Some(addr) = cli.metrics_addr {
        init_metrics(addr).await?;
    }

    match &cli.command {
        Commands::Download(args) => {
            args.execute(cli).await?;
        }
        Commands::Datasets(datasets_cmd) => datasets_cmd.execute(cli.output_format)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    // Skipped chunks are reported, not fatal; only startup faults land here
    if let Err(e) = run(&cli).await {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
