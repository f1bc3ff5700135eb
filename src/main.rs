//! # livedoor scraper
//!
//! Collects livedoor news articles for a list of news ids read from CSV
//! files and saves them as one JSON file.
//!
//! For every id the scraper fetches two pages:
//!
//! - the article page, for the title and the full body text,
//! - the topic page, for the bullet-point summary.
//!
//! ## Usage
//!
//! ```sh
//! livedoor_scraper -i ./data/train.csv -i ./data/test.csv -o ./output/scraped_data.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Loading**: read the news id column of every input CSV file
//! 2. **Fetching**: scrape ids strictly one at a time, pausing after each
//! 3. **Checkpointing**: rewrite the output file every N articles and at the end
//!
//! A failed page only blanks the fields it would have filled. Unreadable
//! inputs and failed checkpoint writes stop the run.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod errors;
mod loader;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::ScraperConfig;
use pipeline::run_scrape;
use scrapers::livedoor::ArticleFetcher;
use utils::truncate_for_log;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("livedoor_scraper starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = match &args.config {
        Some(path) => ScraperConfig::from_yaml_file(path)?,
        None => ScraperConfig::default(),
    };
    args.apply_overrides(&mut config);
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }
    info!(
        inputs = ?config.input_files,
        output = %config.output_path.display(),
        save_freq = config.save_freq,
        interval_ms = config.interval_ms,
        timeout_secs = config.request_timeout_secs,
        "Configuration ready"
    );

    let fetcher = ArticleFetcher::new(&config)?;

    // ---- Scrape ----
    let report = match run_scrape(&config, &fetcher).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %truncate_for_log(&e.to_string(), 500), "Scrape aborted");
            return Err(e.into());
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = report.records.len(),
        body_failures = report.body_failures,
        summary_failures = report.summary_failures,
        checkpoints = report.checkpoints.len(),
        "Execution complete"
    );

    Ok(())
}
