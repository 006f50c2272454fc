//! Service factory for building command dependencies.

use anyhow::Result;

use crate::http::build_http_client;
use crate::provider::GitHubProvider;

use super::config::Config;

/// Build the GitHub release provider from configuration
pub fn build_provider(config: &Config) -> Result<GitHubProvider> {
    let http_client = build_http_client(config.token.as_deref())?;
    Ok(GitHubProvider::from_http_client(http_client, &config.api_url))
}
