//! Classification of failed responses into user-facing error kinds.

use log::debug;
use reqwest::{Response, StatusCode};

/// Header GitHub sets to the number of requests left in the current window.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Why a request to the release host did not produce a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Rate limit exceeded (HTTP 403 with rate limit header or message, or 429)
    RateLimited(String),
    /// Authentication failed (HTTP 401)
    Unauthorized(String),
    /// Resource not found (HTTP 404), e.g. no release published yet
    NotFound(String),
    /// Forbidden access (HTTP 403 non-rate-limit)
    Forbidden(String),
    /// Other 4xx responses
    Client(String),
    /// 5xx responses
    Server(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::RateLimited(msg) => {
                write!(
                    f,
                    "Rate limit exceeded: {}. Try again later or set GITHUB_TOKEN environment variable.",
                    msg
                )
            }
            FetchError::Unauthorized(msg) => {
                write!(f, "Authentication failed: {}. Check your GITHUB_TOKEN.", msg)
            }
            FetchError::NotFound(msg) => write!(f, "Not found: {}", msg),
            FetchError::Forbidden(msg) => {
                write!(f, "Access forbidden: {}. You may need authentication.", msg)
            }
            FetchError::Client(msg) => write!(f, "Request error: {}", msg),
            FetchError::Server(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Classify a non-success status.
///
/// `rate_limited` tells a GitHub rate-limit 403 apart from a plain 403; it is
/// decided from the response headers and body by [`check_response`].
/// Returns `None` for statuses that are not errors.
pub fn classify_status(status: StatusCode, rate_limited: bool) -> Option<FetchError> {
    let kind = match status {
        StatusCode::UNAUTHORIZED => {
            FetchError::Unauthorized("Invalid or missing authentication token".to_string())
        }
        StatusCode::FORBIDDEN if rate_limited => {
            FetchError::RateLimited("GitHub API rate limit exceeded".to_string())
        }
        StatusCode::FORBIDDEN => {
            FetchError::Forbidden("Access to this resource is forbidden".to_string())
        }
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited("Too many requests".to_string()),
        StatusCode::NOT_FOUND => {
            FetchError::NotFound("The requested resource was not found".to_string())
        }
        s if s.is_client_error() => FetchError::Client(format!("HTTP {} error", s.as_u16())),
        s if s.is_server_error() => FetchError::Server(format!("HTTP {} error", s.as_u16())),
        _ => return None,
    };
    Some(kind)
}

/// Pass successful responses through; turn error statuses into a [`FetchError`].
///
/// The body of an error response is consumed to look for GitHub's rate-limit
/// message.
pub async fn check_response(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return Ok(response);
    }

    let exhausted = response
        .headers()
        .get(RATE_LIMIT_REMAINING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");
    let body = response.text().await.unwrap_or_default();
    let rate_limited = exhausted || body.to_lowercase().contains("rate limit");
    debug!("HTTP {} (rate limited: {})", status, rate_limited);

    match classify_status(status, rate_limited) {
        Some(kind) => Err(anyhow::Error::from(kind)),
        None => anyhow::bail!("Unexpected HTTP status {}", status),
    }
}
