use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{error, info};

use topdecks_scraper_lib::application::{build_page_fetcher, run_pipeline};
use topdecks_scraper_lib::infrastructure::config::ConfigManager;
use topdecks_scraper_lib::infrastructure::logging::init_logging_with_config;
use topdecks_scraper_lib::infrastructure::parsing::DeckParser;
use topdecks_scraper_lib::infrastructure::publisher;

#[derive(Parser, Debug)]
#[command(
    name = "topdecks-scraper",
    about = "Crawl yugiohtopdecks.com deck pages into an NDJSON dataset and publish it"
)]
struct Cli {
    /// File receiving the run log
    log_file: PathBuf,

    /// Config file (TOML, JSON or YAML)
    #[arg(long, env = "TOPDECKS_CONFIG")]
    config: Option<PathBuf>,

    /// Write the dataset but do not publish it
    #[arg(long, default_value_t = false)]
    no_publish: bool,

    /// Override the last deck id visited
    #[arg(long)]
    max_deck: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new(cli.config.clone());
    let mut config = config_manager.load_config()?;
    if let Some(max_deck) = cli.max_deck {
        config.crawl.max_deck = max_deck;
    }
    if cli.no_publish {
        config.publish.enabled = false;
    }
    config.validate()?;

    let _log_guard = init_logging_with_config(&config.logging, &cli.log_file)?;
    info!("Starting topdecks-scraper, logging to {}", cli.log_file.display());
    info!("Loaded configuration ({})", config_manager.source_description());

    let fetcher = build_page_fetcher(&config)?;
    let parser = DeckParser::with_config(config.parsing.clone())?;
    let publisher = publisher::from_config(&config.publish);

    match run_pipeline(&config, &fetcher, &parser, publisher.as_ref(), Local::now().date_naive()).await {
        Ok(summary) => {
            info!(
                "Wrote {} decks from {} pages to {}",
                summary.decks_written,
                summary.pages_visited,
                summary.dataset_path.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            Err(e)
        }
    }
}
