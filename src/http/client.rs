//! HTTP client for the release API.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::status::check_response;

pub const USER_AGENT: &str = "release-links";

/// Upper bound for a whole request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Thin wrapper over a reqwest Client. Each call is a single attempt.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let response = check_response(response).await?;

        response
            .json::<T>()
            .await
            .context("Failed to parse JSON response")
    }
}

/// Build an HTTP client with optional authentication token
pub fn build_http_client(token: Option<&str>) -> Result<HttpClient> {
    build_http_client_with_timeout(token, REQUEST_TIMEOUT)
}

pub fn build_http_client_with_timeout(
    token: Option<&str>,
    timeout: Duration,
) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    if let Some(token) = token {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("GITHUB_TOKEN contains characters not allowed in a header")?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        debug!("HTTP client configured with authentication");
    }

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")?;

    Ok(HttpClient::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::FetchError;
    use mockito::Matcher;

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct TestResponse {
        name: String,
        value: i32,
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "test", "value": 42}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result: TestResponse = client.get_json(&format!("{}/test", url)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.name, "test");
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_get_json_not_found_is_classified() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/test")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let err = client
            .get_json::<serde_json::Value>(&format!("{}/test", url))
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_json_makes_a_single_attempt() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/test")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let result = client
            .get_json::<serde_json::Value>(&format!("{}/test", url))
            .await;

        mock.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_json_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/test")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let err = client
            .get_json::<TestResponse>(&format!("{}/test", url))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to parse JSON response"));
    }

    /// Helper to verify the Authorization header sent by a built client
    async fn verify_authorization_header(token: Option<&str>) {
        let mut server = mockito::Server::new_async().await;

        let expected_header = match token {
            Some(t) => Matcher::Exact(format!("Bearer {}", t)),
            None => Matcher::Missing,
        };

        let mock = server
            .mock("GET", "/")
            .match_header("Authorization", expected_header)
            .match_header("User-Agent", USER_AGENT)
            .create_async()
            .await;

        let client = build_http_client(token).unwrap();
        let _ = client.inner().get(server.url()).send().await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_build_http_client_with_token() {
        verify_authorization_header(Some("test_token")).await;
    }

    #[tokio::test]
    async fn test_build_http_client_without_token() {
        verify_authorization_header(None).await;
    }

    #[tokio::test]
    async fn test_get_json_rate_limited_forbidden() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/test")
            .with_status(403)
            .with_header("x-ratelimit-remaining", "0")
            .with_body(r#"{"message": "API rate limit exceeded for 127.0.0.1."}"#)
            .create_async()
            .await;

        let client = HttpClient::new(Client::new());
        let err = client
            .get_json::<serde_json::Value>(&format!("{}/test", url))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::RateLimited(_))
        ));
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[tokio::test]
    async fn test_get_json_times_out_on_stalled_server() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stalled = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = build_http_client_with_timeout(None, Duration::from_millis(200)).unwrap();
        let started = std::time::Instant::now();
        let result = client
            .get_json::<serde_json::Value>(&format!("http://{}/test", addr))
            .await;

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
        stalled.abort();
    }

    #[test]
    fn test_request_timeout_is_bounded() {
        assert!(REQUEST_TIMEOUT > Duration::ZERO);
        assert!(REQUEST_TIMEOUT <= Duration::from_secs(60));
    }

    #[test]
    fn test_build_http_client_rejects_invalid_token() {
        assert!(build_http_client(Some("bad\ntoken")).is_err());
    }
}
