use crate::document::SearchHit;
use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Narrow contract for executing a query string: a fixed-size, ordered
/// batch of field-mapped results.
pub trait SearchClient {
    fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    items: Vec<ApiItem>,
}

#[derive(Debug, Deserialize)]
struct ApiItem {
    #[serde(default)]
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

impl ApiItem {
    fn into_hit(self) -> SearchHit {
        SearchHit {
            url: (!self.link.is_empty()).then_some(self.link),
            title: self.title,
            summary: self.snippet,
        }
    }
}

/// Client for the Google Custom Search JSON API.
pub struct GoogleSearchClient {
    api_key: String,
    engine_id: String,
    number_of_results: usize,
    http: reqwest::blocking::Client,
}

impl GoogleSearchClient {
    const ENDPOINT: &'static str = "https://www.googleapis.com/customsearch/v1";

    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            number_of_results: 10,
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_result_count(mut self, number_of_results: usize) -> Self {
        self.number_of_results = number_of_results;
        self
    }
}

impl SearchClient for GoogleSearchClient {
    fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        tracing::debug!(%query, "issuing search request");
        let response: ApiResponse = self
            .http
            .get(Self::ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .context("search request failed")?
            .error_for_status()
            .context("search API returned an error status")?
            .json()
            .context("search response could not be parsed")?;

        if response.items.len() < self.number_of_results {
            bail!(
                "search returned {} result(s), expected {}",
                response.items.len(),
                self.number_of_results
            );
        }

        Ok(response
            .items
            .into_iter()
            .take(self.number_of_results)
            .map(ApiItem::into_hit)
            .collect())
    }
}
