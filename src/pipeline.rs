//! The scrape-and-checkpoint loop.
//!
//! 1. **Loading**: read every news id from every input file, in order
//! 2. **Fetching**: scrape ids one at a time, appending one record per id
//! 3. **Checkpointing**: after ids at indices 0, K, 2K, ... and once more
//!    when the loop ends, write the full result set to the output file
//!
//! The loop sleeps a fixed interval after every id, whatever the outcome.

use crate::config::ScraperConfig;
use crate::errors::ScrapeRunError;
use crate::loader::load_all_news_ids;
use crate::models::ArticleRecord;
use crate::outputs::checkpoint::write_checkpoint;
use crate::scrapers::ArticleSource;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// What a finished run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub records: Vec<ArticleRecord>,
    /// Result set length at each checkpoint write, final write included.
    pub checkpoints: Vec<usize>,
    pub body_failures: usize,
    pub summary_failures: usize,
}

/// Whether the item at `index` triggers a periodic checkpoint.
pub fn is_checkpoint_index(index: usize, save_freq: usize) -> bool {
    index % save_freq == 0
}

/// Load all ids, scrape them in order and checkpoint along the way.
///
/// # Arguments
///
/// * `config` - Input files, output path, save frequency and pause interval
/// * `source` - Scrapes one article per id
///
/// # Returns
///
/// A [`RunReport`] holding every record in input order, the result set
/// length at each checkpoint and the per-page failure counts.
///
/// # Errors
///
/// Load and checkpoint errors end the run; per-article fetch errors never do.
#[instrument(level = "info", skip_all, fields(output = %config.output_path.display()))]
pub async fn run_scrape<S: ArticleSource>(
    config: &ScraperConfig,
    source: &S,
) -> Result<RunReport, ScrapeRunError> {
    let news_ids = load_all_news_ids(
        &config.input_files,
        config.news_id_column,
        config.skip_header,
    )?;
    let total = news_ids.len();
    info!(total, files = config.input_files.len(), "Loaded news ids");

    let mut report = RunReport {
        records: Vec::with_capacity(total),
        ..RunReport::default()
    };

    for (i, news_id) in news_ids.iter().enumerate() {
        debug!(index = i, total, %news_id, "Scraping article");
        let outcome = source.scrape(news_id).await;
        if outcome.body.is_err() {
            report.body_failures += 1;
        }
        if outcome.summary.is_err() {
            report.summary_failures += 1;
        }
        report.records.push(outcome.into_record());

        if is_checkpoint_index(i, config.save_freq) {
            checkpoint(config, &mut report).await?;
        }
        sleep(config.interval()).await;
    }

    checkpoint(config, &mut report).await?;
    info!(
        total,
        body_failures = report.body_failures,
        summary_failures = report.summary_failures,
        checkpoints = report.checkpoints.len(),
        "Scrape finished"
    );
    Ok(report)
}

async fn checkpoint(config: &ScraperConfig, report: &mut RunReport) -> Result<(), ScrapeRunError> {
    write_checkpoint(&report.records, &config.output_path, config.atomic_checkpoint).await?;
    report.checkpoints.push(report.records.len());
    Ok(())
}
