//! Command-line interface definitions.
//!
//! Every flag is optional. Without flags the scraper runs with the built-in
//! defaults (`./data/train.csv`, `./data/test.csv` → `./output/scraped_data.json`).
//! Flags override values from the YAML file given with `--config`.

use crate::config::ScraperConfig;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the livedoor news scraper.
///
/// # Examples
///
/// ```sh
/// # Defaults
/// livedoor_scraper
///
/// # Custom inputs and a slower pace
/// livedoor_scraper -i ids_a.csv -i ids_b.csv -o out/articles.json --interval-ms 2000
///
/// # Everything from a config file, with the header row skipped
/// livedoor_scraper -c scraper.yaml --skip-header
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, env = "LIVEDOOR_SCRAPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// CSV file with news ids (repeat for several files, read in order)
    #[arg(short, long = "input")]
    pub inputs: Vec<PathBuf>,

    /// Output JSON file, overwritten on each checkpoint
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Zero-based CSV column holding the news id
    #[arg(long)]
    pub column: Option<usize>,

    /// Save after every N-th article
    #[arg(long)]
    pub save_freq: Option<usize>,

    /// Pause after each article, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Per-request HTTP timeout, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Treat the first row of each input file as a header and skip it
    #[arg(long)]
    pub skip_header: bool,

    /// Write checkpoints to a temp file and rename it into place
    #[arg(long)]
    pub atomic_checkpoint: bool,
}

impl Cli {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply_overrides(&self, config: &mut ScraperConfig) {
        if !self.inputs.is_empty() {
            config.input_files = self.inputs.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(column) = self.column {
            config.news_id_column = column;
        }
        if let Some(save_freq) = self.save_freq {
            config.save_freq = save_freq;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.request_timeout_secs = timeout_secs;
        }
        if self.skip_header {
            config.skip_header = true;
        }
        if self.atomic_checkpoint {
            config.atomic_checkpoint = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_without_flags_keeps_defaults() {
        let cli = Cli::parse_from(["livedoor_scraper"]);
        let mut config = ScraperConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, ScraperConfig::default());
    }

    #[test]
    fn test_cli_repeated_inputs_keep_order() {
        let cli = Cli::parse_from([
            "livedoor_scraper",
            "-i",
            "b.csv",
            "--input",
            "a.csv",
            "-o",
            "/tmp/out.json",
        ]);
        assert_eq!(cli.inputs, vec![PathBuf::from("b.csv"), PathBuf::from("a.csv")]);

        let mut config = ScraperConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.input_files, cli.inputs);
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.json"));
    }

    #[test]
    fn test_cli_numeric_and_switch_overrides() {
        let cli = Cli::parse_from([
            "livedoor_scraper",
            "--column",
            "0",
            "--save-freq",
            "5",
            "--interval-ms",
            "1500",
            "--timeout-secs",
            "12",
            "--skip-header",
            "--atomic-checkpoint",
        ]);
        let mut config = ScraperConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.news_id_column, 0);
        assert_eq!(config.save_freq, 5);
        assert_eq!(config.interval_ms, 1500);
        assert_eq!(config.request_timeout_secs, 12);
        assert!(config.skip_header);
        assert!(config.atomic_checkpoint);
    }
}
