use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// One organic result, passed through verbatim. Missing fields stay `null`
/// rather than failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchResultItem {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub link: Option<String>,
}

#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, query: &str) -> SearchResult<Vec<SearchResultItem>>;
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SearchResponse {
    organic: Vec<SearchResultItem>,
}

/// Stateless client for the serper.dev search gateway. Each call is a fresh
/// request carrying the static API key.
#[derive(Clone)]
pub struct SerperClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SerperClient {
    #[must_use]
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl SearchGateway for SerperClient {
    /// A non-success status is swallowed into zero results; only
    /// transport-level failures bubble up.
    async fn search(&self, query: &str) -> SearchResult<Vec<SearchResultItem>> {
        let url = format!("{}/search", self.endpoint);
        let response = self
            .http
            .post(url)
            .header("X-API-KEY", &self.api_key)
            .json(&SearchRequest { q: query })
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                status = %response.status(),
                "search gateway returned non-success, treating as zero results"
            );
            return Ok(Vec::new());
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.organic)
    }
}
