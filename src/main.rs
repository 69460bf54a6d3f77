use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pdfmerge::cli::Cli;
use pdfmerge::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::try_from(&cli)?;

    let level = if config.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("pdfmerge={level},tower_http={level}"))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!(?config, "starting {} v{}", pdfmerge::NAME, pdfmerge::VERSION);

    pdfmerge::server::serve(config).await
}
