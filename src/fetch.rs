//! HTTP gateway for the public Pinterest endpoints
//!
//! Performs a single GET per call. Transport failures and non-success statuses
//! are returned as errors; there is no retry.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when fetching a URL
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Did not receive a success response from {url}: {status}")]
    Status { url: String, status: StatusCode },

    /// Failed to parse the body as JSON
    #[error("Failed to parse JSON response from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Thin wrapper over a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct FetchGateway {
    http_client: Client,
}

impl FetchGateway {
    /// Create a new gateway with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new gateway with a custom HTTP client
    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Fetches a URL and returns the body as text
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!(url, "GET");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, %status, "unexpected response status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches a URL and parses the body as JSON
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let text = self.get_text(url).await?;
        serde_json::from_str(&text).map_err(|source| FetchError::Json {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_text_returns_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alice/board.rss"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<rss/>"))
            .mount(&server)
            .await;

        let gateway = FetchGateway::new();
        let body = gateway
            .get_text(&format!("{}/alice/board.rss", server.uri()))
            .await
            .expect("Fetch should succeed");

        assert_eq!(body, "<rss/>");
    }

    #[tokio::test]
    async fn test_get_json_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alice/boards"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"body":[{"href":"/alice/a/"}]}"#),
            )
            .mount(&server)
            .await;

        let gateway = FetchGateway::new();
        let body = gateway
            .get_json(&format!("{}/alice/boards", server.uri()))
            .await
            .expect("Fetch should succeed");

        assert_eq!(body["body"][0]["href"], "/alice/a/");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let gateway = FetchGateway::new();
        let result = gateway.get_text(&format!("{}/missing", server.uri())).await;

        match result {
            Err(FetchError::Status { status, url }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(url.ends_with("/missing"));
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let gateway = FetchGateway::new();
        let result = gateway.get_json(&format!("{}/boards", server.uri())).await;

        assert!(matches!(result, Err(FetchError::Json { .. })));
    }

    #[tokio::test]
    async fn test_transport_failure_is_an_error() {
        let server = MockServer::start().await;
        let url = format!("{}/unreachable", server.uri());
        drop(server);

        let gateway = FetchGateway::new();
        let result = gateway.get_text(&url).await;

        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
