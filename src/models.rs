//! Data models for provider responses and render-ready article records.
//!
//! Two layers live here:
//! - Wire types ([`SearchResponse`], [`SearchResult`], [`ContentFields`])
//!   mirroring the Guardian search API's JSON, decoded leniently so an
//!   unexpected shape degrades to an empty result list instead of an error.
//! - [`ArticleRecord`], the flattened set of display fields a view renders.
//!   Records are built fresh from each response item and discarded after
//!   rendering; nothing here is persisted.
//!
//! Provider field names are camelCase on the wire and mapped onto snake_case
//! Rust fields with serde renames.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::utils::{format_publication_date, strip_html, truncate_with_ellipsis};

/// Display name of the provider, shown on every card.
pub const SOURCE_NAME: &str = "The Guardian";

/// Image shown when a result carries no thumbnail.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x200";

/// Maximum title length in characters before truncation.
pub const TITLE_MAX_CHARS: usize = 80;

/// Maximum description length in characters before truncation.
pub const DESCRIPTION_MAX_CHARS: usize = 180;

/// Top-level search API response envelope.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub response: SearchBody,
}

/// The nested body holding the result list.
#[derive(Debug, Default, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One raw search result as the provider returns it.
///
/// Every field is optional on our side: the provider omits fields freely and
/// a missing value should never fail the whole page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Article headline.
    #[serde(default)]
    pub web_title: Option<String>,
    /// RFC 3339 publication timestamp.
    #[serde(default)]
    pub web_publication_date: Option<String>,
    /// Canonical article URL.
    #[serde(default)]
    pub web_url: Option<String>,
    /// Extra fields requested via the `show-fields` parameter.
    #[serde(default)]
    pub fields: Option<ContentFields>,
}

/// The `show-fields` sub-object: thumbnail and trail text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFields {
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub trail_text: Option<String>,
}

/// Render-ready fields for one article card.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    /// Headline, truncated for display.
    pub title: String,
    /// Thumbnail URL, or the fixed placeholder.
    pub image_url: String,
    /// Provider name, with the formatted publication date appended when the
    /// timestamp was present and parseable.
    pub source_label: String,
    /// Publication instant, when present and parseable.
    pub published_at: Option<DateTime<FixedOffset>>,
    /// Trail text with markup stripped, truncated for display.
    pub description: String,
    /// Canonical article URL; cards without one are inert.
    pub target_url: Option<String>,
}

impl ArticleRecord {
    /// Map one raw provider result onto display fields.
    pub fn from_result(result: &SearchResult) -> Self {
        let fields = result.fields.as_ref();

        let image_url = fields
            .and_then(|f| f.thumbnail.clone())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        let title = truncate_with_ellipsis(
            result.web_title.as_deref().unwrap_or("Untitled"),
            TITLE_MAX_CHARS,
        );

        let raw_description = fields.and_then(|f| f.trail_text.as_deref()).unwrap_or("");
        let description =
            truncate_with_ellipsis(&strip_html(raw_description), DESCRIPTION_MAX_CHARS);

        let formatted_date = result
            .web_publication_date
            .as_deref()
            .and_then(format_publication_date);
        let source_label = match &formatted_date {
            Some(date) => format!("{SOURCE_NAME} · {date}"),
            None => SOURCE_NAME.to_string(),
        };

        let published_at = result
            .web_publication_date
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok());

        Self {
            title,
            image_url,
            source_label,
            published_at,
            description,
            target_url: result.web_url.clone(),
        }
    }
}
