//! RSS/Atom feed retrieval.

use std::collections::BTreeSet;
use std::time::Duration;

use feed_rs::model::Entry;
use reqwest::Client;
use subscope_core::Post;

use crate::error::AnalysisError;
use crate::normalize::normalize_content;

/// Path appended to a publication URL to reach its feed.
pub const FEED_SUFFIX: &str = "/feed";

/// Turn a publication URL into its feed URL.
///
/// Trailing slashes are dropped; [`FEED_SUFFIX`] is appended unless the URL
/// already ends with it.
#[must_use]
pub fn resolve_feed_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.ends_with(FEED_SUFFIX) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{FEED_SUFFIX}")
    }
}

/// Fetches feeds over HTTP. Performs no retries.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Build a client with the given user agent and transport timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch `url` and return at most `limit` posts in feed order.
    ///
    /// `url` is used as given; callers resolve publication URLs with
    /// [`resolve_feed_url`] first.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::FeedFetch`] on network failure or a non-2xx
    /// status, and [`AnalysisError::FeedParse`] if the body is not a valid feed.
    pub async fn fetch_posts(&self, url: &str, limit: usize) -> Result<Vec<Post>, AnalysisError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AnalysisError::FeedFetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::FeedFetch {
                url: url.to_string(),
                reason: format!("unexpected HTTP status {status}"),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AnalysisError::FeedFetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let posts = parse_feed(&body, limit).map_err(|source| AnalysisError::FeedParse {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!(url, count = posts.len(), "fetched feed posts");
        Ok(posts)
    }
}

/// Parse an RSS or Atom document into at most `limit` posts.
///
/// # Errors
///
/// Returns the parser error when the document is not a recognizable feed.
pub fn parse_feed(body: &[u8], limit: usize) -> Result<Vec<Post>, feed_rs::parser::ParseFeedError> {
    let feed = feed_rs::parser::parse(body)?;
    Ok(feed
        .entries
        .into_iter()
        .take(limit)
        .map(entry_to_post)
        .collect())
}

fn entry_to_post(entry: Entry) -> Post {
    let raw_content = entry
        .content
        .and_then(|c| c.body)
        .or_else(|| entry.summary.map(|s| s.content))
        .unwrap_or_default();

    let normalized_content = normalize_content(&raw_content);

    Post {
        id: entry.id,
        title: entry
            .title
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string()),
        raw_content,
        normalized_content,
        published_at: entry.published.or(entry.updated),
        link: entry.links.into_iter().next().map(|l| l.href),
        author: entry
            .authors
            .into_iter()
            .map(|p| p.name)
            .find(|n| !n.trim().is_empty()),
        categories: entry
            .categories
            .into_iter()
            .map(|c| c.term)
            .filter(|t| !t.trim().is_empty())
            .collect::<BTreeSet<_>>(),
    }
}
