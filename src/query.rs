//! Query state and request URL construction for the Guardian search API.
//!
//! The feed has exactly one [`QueryState`] per session. It is never mutated
//! ad hoc: all changes go through the named transitions
//! [`QueryState::select_category`], [`QueryState::submit_search`], and
//! [`QueryState::advance_page`], which enforce the page-reset invariant.
//! [`build_url`] is a pure function from state to a fully-qualified GET URL.
//!
//! # Category mapping
//!
//! Nav categories are the reader's own labels, not provider identifiers.
//! A static alias table maps them onto Guardian section ids where one
//! exists (`sports` → `sport`, `entertainment` → `culture`); `weather` maps
//! to no section and falls back to a free-text query. The sentinel
//! `general` category issues a sectionless front-page query.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use url::Url;

/// Default Guardian Open Platform search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://content.guardianapis.com/search";

/// The provider's public development key.
pub const DEFAULT_API_KEY: &str = "test";

/// Results requested per page.
pub const PAGE_SIZE: u32 = 12;

/// Sentinel category for the sectionless front page.
pub const GENERAL: &str = "general";

/// Guardian section ids accepted as a structured `section` filter.
const GUARDIAN_SECTIONS: &[&str] = &[
    "politics",
    "sport",
    "business",
    "technology",
    "health",
    "science",
    "culture",
    "environment",
    "world",
];

/// Nav categories shown to the reader, in display order.
pub const NAV_CATEGORIES: &[&str] = &[
    "general",
    "world",
    "politics",
    "business",
    "technology",
    "science",
    "health",
    "sports",
    "entertainment",
    "environment",
    "weather",
];

/// Nav label → Guardian section id. `None` means the label has no section
/// and is queried as a free-text keyword instead.
static SECTION_ALIASES: Lazy<HashMap<&'static str, Option<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        ("sports", Some("sport")),
        ("entertainment", Some("culture")),
        ("weather", None),
    ])
});

/// How the feed is currently being browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browsing by a fixed navigational topic.
    Category,
    /// Browsing by free-text query.
    Search,
}

/// The single mutable state record behind the feed.
///
/// `page` is always >= 1. It resets to 1 whenever `mode`, `category`, or
/// `query` changes and only increments through [`QueryState::advance_page`].
#[derive(Debug, Clone)]
pub struct QueryState {
    pub mode: Mode,
    pub category: String,
    pub query: String,
    pub page: u32,
    pub page_size: u32,
}

impl QueryState {
    /// Fresh session state: the sectionless front page at page 1.
    pub fn new(page_size: u32) -> Self {
        Self {
            mode: Mode::Category,
            category: GENERAL.to_string(),
            query: String::new(),
            page: 1,
            page_size,
        }
    }

    /// Switch to category browsing, resetting pagination.
    pub fn select_category(&mut self, id: &str) {
        self.mode = Mode::Category;
        self.category = id.to_string();
        self.page = 1;
    }

    /// Switch to search mode with the trimmed query text, resetting
    /// pagination. Returns `false` (state untouched) when the trimmed text
    /// is empty.
    pub fn submit_search(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.mode = Mode::Search;
        self.query = trimmed.to_string();
        self.page = 1;
        true
    }

    /// Move to the next page. Only ever called for a load-more action.
    pub fn advance_page(&mut self) {
        self.page += 1;
    }
}

/// Build the search request URL for the current state.
///
/// Always sets `page-size`, `page`, `api-key`, and the `show-fields`
/// selector requesting thumbnails and trail text. Mode-dependent parameters
/// follow the category-mapping rules in the module docs; search mode sets
/// `q` and never `section`. Callers guarantee search text is non-empty.
pub fn build_url(state: &QueryState, endpoint: &Url, api_key: &str) -> Url {
    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("page-size", &state.page_size.to_string());
        pairs.append_pair("page", &state.page.to_string());
        pairs.append_pair("api-key", api_key);
        pairs.append_pair("show-fields", "thumbnail,trailText");

        match state.mode {
            Mode::Search => {
                pairs.append_pair("q", &state.query);
            }
            Mode::Category => {
                let mapped = SECTION_ALIASES
                    .get(state.category.as_str())
                    .copied()
                    .unwrap_or(Some(state.category.as_str()));
                match mapped {
                    Some(section) if GUARDIAN_SECTIONS.contains(&section) => {
                        pairs.append_pair("section", section);
                    }
                    _ => {
                        if state.category != GENERAL {
                            pairs.append_pair("q", &state.category);
                        }
                    }
                }
            }
        }
    }
    url
}
