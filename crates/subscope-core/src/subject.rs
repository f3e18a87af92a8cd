use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A content author being analyzed. `id` is the slug and primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub feed_url: String,
    #[serde(default)]
    pub description: String,
    pub last_analyzed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub post_count: usize,
}

/// Derive a URL-safe slug from a display name.
///
/// Lowercases and joins whitespace-separated runs with single hyphens.
/// Names differing only in case or spacing map to the same slug.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// True when every character of `slug` is an ASCII lowercase letter, digit,
/// or hyphen.
#[must_use]
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Input accepted by the analysis surfaces (CLI and HTTP).
///
/// Fields are optional at the type level so a missing field reaches
/// [`AnalysisRequest::validate`] instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub name: Option<String>,
    pub feed_url: Option<String>,
    pub description: Option<String>,
}

impl AnalysisRequest {
    /// Validate required fields and build the subject record they describe.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `name` or `feedUrl` is missing or
    /// blank, when the name's slug is not URL-safe, or when `feedUrl` is not an
    /// http(s) URL.
    pub fn validate(&self) -> Result<Subject, CoreError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::Validation("name is required".to_string()))?;

        let id = slugify(name);
        if !is_url_safe_slug(&id) {
            return Err(CoreError::Validation(format!(
                "name must contain only letters, digits, hyphens and spaces, got '{name}'"
            )));
        }

        let feed_url = self
            .feed_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::Validation("feedUrl is required".to_string()))?;

        if !(feed_url.starts_with("http://") || feed_url.starts_with("https://")) {
            return Err(CoreError::Validation(format!(
                "feedUrl must be an http(s) URL, got '{feed_url}'"
            )));
        }

        Ok(Subject {
            id,
            name: name.to_string(),
            feed_url: feed_url.to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            last_analyzed: None,
            post_count: 0,
        })
    }
}

/// Result of a successful analysis request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub subject: Subject,
    pub report_id: String,
}
