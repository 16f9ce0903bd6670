//! HTTP client for the Guardian search API.
//!
//! The fetch seam is the [`ArticleProvider`] trait so the feed controller
//! can be exercised against a test double. The production implementation,
//! [`GuardianClient`], wraps a shared `reqwest::Client`.
//!
//! # Decoding policy
//!
//! Transport failures and non-success statuses are errors and surface
//! through the loader's failure path. A body that cannot be decoded into
//! the expected envelope — invalid JSON or an unexpected shape — is logged
//! and treated as an empty result list (the caller renders that as "no
//! articles", not a failure).

use reqwest::Client;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::models::{SearchResponse, SearchResult};
use crate::query::{build_url, QueryState};

/// A source of one page of search results for a given query state.
pub trait ArticleProvider {
    /// Fetch the page of results described by `state`.
    async fn fetch_page(&self, state: &QueryState) -> Result<Vec<SearchResult>, Box<dyn Error>>;
}

/// Guardian Open Platform client.
#[derive(Debug, Clone)]
pub struct GuardianClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl GuardianClient {
    /// Create a client against `endpoint` authenticated with `api_key`.
    pub fn new(endpoint: Url, api_key: String) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            api_key,
        }
    }
}

impl ArticleProvider for GuardianClient {
    #[instrument(level = "info", skip_all, fields(page = state.page, mode = ?state.mode))]
    async fn fetch_page(&self, state: &QueryState) -> Result<Vec<SearchResult>, Box<dyn Error>> {
        let url = build_url(state, &self.endpoint, &self.api_key);
        debug!(%url, "Requesting search page");

        let t0 = Instant::now();
        let response = self.http.get(url).send().await?.error_for_status()?;
        let text = response.text().await?;
        let dt = t0.elapsed();

        let body: SearchResponse = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Response JSON did not match the expected shape; treating as empty");
                SearchResponse::default()
            }
        };

        info!(
            count = body.response.results.len(),
            elapsed_ms = dt.as_millis() as u64,
            "Fetched search page"
        );
        Ok(body.response.results)
    }
}
