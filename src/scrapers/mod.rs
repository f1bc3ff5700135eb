//! Article sources.
//!
//! A source turns one news id into a [`ScrapeOutcome`]. It never fails as a
//! whole: network and markup problems are reported per page inside the
//! outcome, so the run loop can keep going.
//!
//! | Source | Module | Pages per id |
//! |--------|--------|--------------|
//! | livedoor news | [`livedoor`] | article page (title, body), topic page (summary) |

use crate::models::ScrapeOutcome;

pub mod livedoor;

/// Something that can scrape one article by id.
pub trait ArticleSource {
    async fn scrape(&self, news_id: &str) -> ScrapeOutcome;
}
