//! HTTP seam shared by every catalog provider.
//!
//! Providers never touch reqwest directly; they build a [`CatalogRequest`]
//! and get back untyped JSON, which keeps them testable with a mock fetcher.

use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};

use crate::error::{AppError, AppResult};

/// One read request against a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl CatalogRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, key: &str, value: impl ToString) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// Value of a query parameter, if set
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Issues a request and returns the parsed JSON body.
///
/// Implementations must return `AppError::NotFound` for HTTP 404 and
/// `AppError::CatalogUnavailable` for any other non-success status,
/// transport failure, or undecodable body.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(&self, request: CatalogRequest) -> AppResult<serde_json::Value>;
}

/// reqwest-backed fetcher
#[derive(Clone)]
pub struct HttpJsonFetcher {
    http_client: HttpClient,
}

impl HttpJsonFetcher {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("moodrec-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http_client })
    }
}

#[async_trait::async_trait]
impl JsonFetcher for HttpJsonFetcher {
    async fn get_json(&self, request: CatalogRequest) -> AppResult<serde_json::Value> {
        let mut builder = self.http_client.get(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(&request.url, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(request.url));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                url = %request.url,
                status = %status,
                body = %body,
                "Catalog returned non-success status"
            );
            return Err(AppError::CatalogUnavailable(format!(
                "{} returned status {}: {}",
                request.url, status, body
            )));
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            AppError::CatalogUnavailable(format!(
                "failed to parse response from {}: {}",
                request.url,
                e.without_url()
            ))
        })
    }
}

/// reqwest errors print the full request URL, API key query included, so
/// the URL is dropped and only the bare endpoint is reported.
fn transport_error(url: &str, e: reqwest::Error) -> AppError {
    let e = e.without_url();
    tracing::warn!(url = %url, error = %e, "Catalog request failed");
    AppError::CatalogUnavailable(format!("request to {} failed: {}", url, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_collects_params() {
        let request = CatalogRequest::get("https://api.rawg.io/api/games")
            .query("key", "abc")
            .query("page", 2)
            .header("Accept", "application/json");

        assert_eq!(request.url, "https://api.rawg.io/api/games");
        assert_eq!(request.param("key"), Some("abc"));
        assert_eq!(request.param("page"), Some("2"));
        assert_eq!(request.param("missing"), None);
        assert_eq!(request.headers.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let fetcher = HttpJsonFetcher::new(Duration::from_secs(2)).unwrap();
        let request = CatalogRequest::get("http://127.0.0.1:1/games").query("key", "s3cr3t-key");

        let error = fetcher.get_json(request).await.unwrap_err();

        let message = error.to_string();
        assert!(matches!(error, AppError::CatalogUnavailable(_)));
        assert!(message.contains("http://127.0.0.1:1/games"));
        assert!(!message.contains("s3cr3t-key"));
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpJsonFetcher::new(Duration::from_secs(5)).is_ok());
    }
}
