//! Small helpers shared by the fetcher, the checkpoint writer and `main`.

use crate::config::NEWS_ID_PLACEHOLDER;
use crate::errors::FetchError;
use url::Url;

/// Substitute `news_id` into a URL template and parse the result.
///
/// # Examples
///
/// ```ignore
/// let url = render_url("http://news.livedoor.com/article/detail/{news_id}/", "123")?;
/// assert_eq!(url.as_str(), "http://news.livedoor.com/article/detail/123/");
/// ```
pub fn render_url(template: &str, news_id: &str) -> Result<Url, FetchError> {
    let url = template.replace(NEWS_ID_PLACEHOLDER, news_id);
    Url::parse(&url).map_err(|source| FetchError::Url { url, source })
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last char boundary before `max` bytes and
/// get `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// The last `n` items of `items`, for the checkpoint tail sample.
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
