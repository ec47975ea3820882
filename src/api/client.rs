use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::CONFIG;

use super::SearchTransport;
use super::error::QueryError;
use super::models::{HealthResponse, SearchRequest, SearchResponse};

pub mod paths {
    pub const SEARCH: &str = "search";
    pub const HEALTH: &str = "health";
}

/// HTTP client for the precedent search backend.
///
/// One call is one request: nothing is retried, cached or deduplicated, and there is
/// no timeout unless one was configured.
#[derive(Debug, Clone)]
pub struct QueryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl QueryClient {
    pub fn new(base_url: &str) -> Result<Self, QueryError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, QueryError> {
        let base_url = normalize_base_url(base_url)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|source| QueryError::ClientBuild { source })?;
        Ok(Self { http, base_url })
    }

    /// Create a client using environment configuration
    pub fn from_config() -> Result<Self, QueryError> {
        Self::with_timeout(&CONFIG.api_url, CONFIG.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, QueryError> {
        self.base_url
            .join(path)
            .map_err(|_| QueryError::InvalidUrl(format!("{}{}", self.base_url, path)))
    }

    /// Posts `{"query": query}` to `/search`. The query is sent exactly as given.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, QueryError> {
        let url = self.endpoint(paths::SEARCH)?;
        log::debug!("POST {url}");
        let body = SearchRequest {
            query: query.to_string(),
        };
        let response = self
            .http
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|source| QueryError::Network {
                url: url.to_string(),
                source,
            })?;
        let parsed: SearchResponse = read_json(&url, response).await?;
        log::info!(
            "search returned {} cases (valid: {}, summary: {})",
            parsed.cases.len(),
            parsed.is_valid,
            parsed.web_summary.is_some()
        );
        Ok(parsed)
    }

    pub async fn health(&self) -> Result<HealthResponse, QueryError> {
        let url = self.endpoint(paths::HEALTH)?;
        log::debug!("GET {url}");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| QueryError::Network {
                url: url.to_string(),
                source,
            })?;
        read_json(&url, response).await
    }
}

impl SearchTransport for QueryClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, QueryError> {
        QueryClient::search(self, query).await
    }
}

async fn read_json<T: DeserializeOwned>(
    url: &Url,
    response: reqwest::Response,
) -> Result<T, QueryError> {
    let status = response.status();
    let body = response.text().await.map_err(|source| QueryError::Network {
        url: url.to_string(),
        source,
    })?;
    if !status.is_success() {
        log::warn!("{url} responded with {status}");
        return Err(QueryError::from_status(status.as_u16(), &body));
    }
    serde_json::from_str(&body).map_err(|source| QueryError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Parses the base URL and makes sure its path ends in `/`, so joining `search`
/// appends to the path instead of replacing its last segment.
fn normalize_base_url(raw: &str) -> Result<Url, QueryError> {
    let mut url = Url::parse(raw.trim()).map_err(|_| QueryError::InvalidUrl(raw.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(QueryError::InvalidUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[test]
fn test_normalize_base_url() {
    let url = normalize_base_url("http://localhost:8000").unwrap();
    assert_eq!(url.join("search").unwrap().as_str(), "http://localhost:8000/search");

    let url = normalize_base_url("https://example.org/api").unwrap();
    assert_eq!(url.join("search").unwrap().as_str(), "https://example.org/api/search");

    let url = normalize_base_url("https://example.org/api/").unwrap();
    assert_eq!(url.join("health").unwrap().as_str(), "https://example.org/api/health");
}

#[test]
fn test_normalize_base_url_rejects_garbage() {
    assert!(matches!(
        normalize_base_url("localhost:8000"),
        Err(QueryError::InvalidUrl(_))
    ));
    assert!(matches!(
        normalize_base_url("ftp://example.org"),
        Err(QueryError::InvalidUrl(_))
    ));
    assert!(matches!(normalize_base_url(""), Err(QueryError::InvalidUrl(_))));
}
