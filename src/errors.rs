//! Error types for configuration, id loading, fetching and checkpointing.
//!
//! Only [`FetchError`] is recoverable: it is recorded against a single
//! field group of a single article and the run continues. Every other error
//! here ends the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable configuration. Raised before any work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid CSS selector for {name}: '{selector}'")]
    Selector { name: &'static str, selector: String },
    #[error("invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failure while reading news ids from an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open input file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("line {line} of '{path}' has {width} column(s), news id column {column} is out of range")]
    MissingColumn {
        path: PathBuf,
        line: usize,
        column: usize,
        width: usize,
    },
}

/// Failure of one fetch-and-parse operation for one article.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("no element matches selector '{selector}'")]
    MissingElement { selector: String },
}

/// Failure while writing or reading a checkpoint file.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint io failure at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("checkpoint (de)serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Fatal errors of a scrape run.
#[derive(Debug, Error)]
pub enum ScrapeRunError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}
