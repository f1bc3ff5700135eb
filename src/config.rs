//! Scraper settings.
//!
//! Every constant of a run (input files, output path, URL templates, CSS
//! selectors, pacing) is a named field of [`ScraperConfig`]. Values come from
//! the built-in defaults, then an optional YAML file, then command-line
//! overrides (see [`crate::cli::Cli::apply_overrides`]).
//!
//! # Example
//!
//! ```yaml
//! input_files:
//!   - ./data/train.csv
//!   - ./data/test.csv
//! output_path: ./output/scraped_data.json
//! save_freq: 10
//! interval_ms: 500
//! ```

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};

/// Placeholder substituted with the news id in URL templates.
pub const NEWS_ID_PLACEHOLDER: &str = "{news_id}";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.114 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperConfig {
    /// CSV files holding news ids, read in this order.
    pub input_files: Vec<PathBuf>,
    /// Checkpoint file, overwritten on every save.
    pub output_path: PathBuf,
    /// Zero-based CSV column of the news id.
    pub news_id_column: usize,
    /// Drop the first row of every input file.
    pub skip_header: bool,
    /// Save after every `save_freq`-th article (indices 0, K, 2K, ...).
    pub save_freq: usize,
    /// Pause after each article, in milliseconds.
    pub interval_ms: u64,
    /// Per-request HTTP timeout, in seconds.
    pub request_timeout_secs: u64,
    /// Write checkpoints to a temp file and rename over the target.
    pub atomic_checkpoint: bool,
    pub body_url_template: String,
    pub topic_url_template: String,
    pub title_selector: String,
    pub body_selector: String,
    pub summary_selector: String,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            input_files: vec![
                PathBuf::from("./data/train.csv"),
                PathBuf::from("./data/test.csv"),
            ],
            output_path: PathBuf::from("./output/scraped_data.json"),
            news_id_column: 3,
            skip_header: false,
            save_freq: 10,
            interval_ms: 500,
            request_timeout_secs: 30,
            atomic_checkpoint: false,
            body_url_template: "http://news.livedoor.com/article/detail/{news_id}/".to_string(),
            topic_url_template: "http://news.livedoor.com/topics/detail/{news_id}/".to_string(),
            title_selector: "#article-body > article > header > h1".to_string(),
            body_selector: "#article-body > article > div.articleBody > span".to_string(),
            summary_selector:
                "#main > div > article > div.topicsBody > div.summaryBox > div > ul > li"
                    .to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScraperConfig {
    /// Load settings from a YAML file. Keys missing from the file keep their
    /// default values.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ScraperConfig =
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Loaded scraper configuration");
        Ok(config)
    }

    /// Reject settings that would make the run meaningless or loop forever.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_files.is_empty() {
            return Err(ConfigError::Invalid {
                name: "input_files",
                reason: "at least one input file is required".to_string(),
            });
        }
        if self.save_freq == 0 {
            return Err(ConfigError::Invalid {
                name: "save_freq",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "request_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        for (name, template) in [
            ("body_url_template", &self.body_url_template),
            ("topic_url_template", &self.topic_url_template),
        ] {
            if !template.contains(NEWS_ID_PLACEHOLDER) {
                return Err(ConfigError::Invalid {
                    name,
                    reason: format!("'{template}' lacks the {NEWS_ID_PLACEHOLDER} placeholder"),
                });
            }
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
