//! HTTP client module with status classification.

mod client;
mod status;

pub use client::{
    HttpClient, REQUEST_TIMEOUT, USER_AGENT, build_http_client, build_http_client_with_timeout,
};
pub use status::{FetchError, RATE_LIMIT_REMAINING, check_response, classify_status};
