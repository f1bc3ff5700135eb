//! livedoor news article scraper.
//!
//! Each news id maps to two pages:
//!
//! - the article page (`/article/detail/{news_id}/`), holding the title and
//!   the full body text,
//! - the topic page (`/topics/detail/{news_id}/`), holding a short bullet
//!   list summary.
//!
//! The two pages are fetched one after the other and fail independently.
//! Title and body come from the same page and are kept or dropped together.

use super::ArticleSource;
use crate::config::ScraperConfig;
use crate::errors::{ConfigError, FetchError};
use crate::models::{ArticleBody, ScrapeOutcome};
use crate::utils::render_url;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, error, instrument};
use url::Url;

/// A parsed CSS selector together with its source text, for error reports.
#[derive(Debug, Clone)]
pub struct NamedSelector {
    pub css: String,
    pub selector: Selector,
}

impl NamedSelector {
    pub fn parse(name: &'static str, css: &str) -> Result<Self, ConfigError> {
        let selector = Selector::parse(css).map_err(|_| ConfigError::Selector {
            name,
            selector: css.to_string(),
        })?;
        Ok(Self {
            css: css.to_string(),
            selector,
        })
    }
}

/// Fetches and parses both livedoor pages for a news id.
#[derive(Debug)]
pub struct ArticleFetcher {
    client: Client,
    body_url_template: String,
    topic_url_template: String,
    title: NamedSelector,
    body: NamedSelector,
    summary: NamedSelector,
}

impl ArticleFetcher {
    /// Build the HTTP client and parse the selectors. Any bad selector is a
    /// configuration error.
    pub fn new(config: &ScraperConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            body_url_template: config.body_url_template.clone(),
            topic_url_template: config.topic_url_template.clone(),
            title: NamedSelector::parse("title_selector", &config.title_selector)?,
            body: NamedSelector::parse("body_selector", &config.body_selector)?,
            summary: NamedSelector::parse("summary_selector", &config.summary_selector)?,
        })
    }

    /// Fetch the article page and extract title and body.
    #[instrument(level = "info", skip_all, fields(%news_id))]
    pub async fn fetch_body(&self, news_id: &str) -> Result<ArticleBody, FetchError> {
        let url = render_url(&self.body_url_template, news_id)?;
        let html = self.get_html(url).await?;
        let article = parse_article_body(&html, &self.title, &self.body)?;
        debug!(
            title = %article.title,
            body_bytes = article.body.len(),
            "Parsed article page"
        );
        Ok(article)
    }

    /// Fetch the topic page and extract the summary sentences.
    #[instrument(level = "info", skip_all, fields(%news_id))]
    pub async fn fetch_summary(&self, news_id: &str) -> Result<Vec<String>, FetchError> {
        let url = render_url(&self.topic_url_template, news_id)?;
        let html = self.get_html(url).await?;
        let summary = parse_summary(&html, &self.summary);
        debug!(sentences = summary.len(), "Parsed topic page");
        Ok(summary)
    }

    async fn get_html(&self, url: Url) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

impl ArticleSource for ArticleFetcher {
    async fn scrape(&self, news_id: &str) -> ScrapeOutcome {
        let body = self.fetch_body(news_id).await;
        if let Err(e) = &body {
            error!(%news_id, error = %e, "Error in body");
        }

        let summary = self.fetch_summary(news_id).await;
        if let Err(e) = &summary {
            error!(%news_id, error = %e, "Error in summary");
        }

        ScrapeOutcome {
            news_id: news_id.to_string(),
            body,
            summary,
        }
    }
}

/// Extract the first title match and the first body match from an article
/// page. Both must be present.
pub fn parse_article_body(
    html: &str,
    title: &NamedSelector,
    body: &NamedSelector,
) -> Result<ArticleBody, FetchError> {
    let document = Html::parse_document(html);
    Ok(ArticleBody {
        title: first_text(&document, title)?,
        body: first_text(&document, body)?,
    })
}

/// Extract the text of every summary item, in document order. A page with no
/// matching items yields an empty list.
pub fn parse_summary(html: &str, summary: &NamedSelector) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&summary.selector)
        .map(|element| element.text().collect::<String>())
        .collect()
}

fn first_text(document: &Html, selector: &NamedSelector) -> Result<String, FetchError> {
    document
        .select(&selector.selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .ok_or_else(|| FetchError::MissingElement {
            selector: selector.css.clone(),
        })
}
