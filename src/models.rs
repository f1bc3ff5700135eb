//! Data models for scraped articles.
//!
//! - [`ArticleBody`]: title and body text taken from the article page
//! - [`ScrapeOutcome`]: the two per-page results for one news id, kept as
//!   explicit `Result`s so a partial failure is visible to the caller
//! - [`ArticleRecord`]: the persisted form, one per news id, with absent
//!   fields for the pages that failed

use crate::errors::FetchError;
use serde::{Deserialize, Serialize};

/// Title and body text extracted from an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleBody {
    pub title: String,
    pub body: String,
}

/// Result of scraping both pages for one news id.
///
/// The body page and the topic page are fetched independently; either
/// side may fail without affecting the other.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub news_id: String,
    pub body: Result<ArticleBody, FetchError>,
    pub summary: Result<Vec<String>, FetchError>,
}

impl ScrapeOutcome {
    pub fn into_record(self) -> ArticleRecord {
        let (title, body) = match self.body {
            Ok(ArticleBody { title, body }) => (Some(title), Some(body)),
            Err(_) => (None, None),
        };
        ArticleRecord {
            news_id: self.news_id,
            title,
            body,
            summary: self.summary.ok(),
        }
    }
}

/// One entry of the checkpoint file.
///
/// Unset fields serialize as `null`. An empty `summary` list means the topic
/// page loaded but carried no summary items, which is different from `null`
/// (topic page failed).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    pub news_id: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub summary: Option<Vec<String>>,
}

impl ArticleRecord {
    /// A record with only the id set.
    #[cfg(test)]
    pub fn empty(news_id: impl Into<String>) -> Self {
        Self {
            news_id: news_id.into(),
            title: None,
            body: None,
            summary: None,
        }
    }
}
