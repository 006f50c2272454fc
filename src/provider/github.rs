//! GitHub provider implementation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Url;

use crate::domain::model::{ReleaseAsset, ReleaseDescriptor};
use crate::http::HttpClient;

use super::{Provider, ReleaseRef, RepoId};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API response types (internal).
mod api {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Release {
        #[serde(default)]
        pub tag_name: Option<String>,
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub published_at: Option<String>,
        #[serde(default)]
        pub prerelease: bool,
        #[serde(default)]
        pub assets: Option<Vec<Asset>>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Asset {
        pub name: String,
        #[serde(default)]
        pub size: u64,
        pub browser_download_url: String,
    }
}

/// GitHub provider implementation.
pub struct GitHubProvider {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubProvider {
    /// Create from an existing HttpClient.
    pub fn from_http_client(http_client: HttpClient, api_url: &str) -> Self {
        Self {
            http_client,
            api_url: api_url.to_string(),
        }
    }

    /// Endpoint for a release: `/repos/{owner}/{repo}/releases/latest` or
    /// `/repos/{owner}/{repo}/releases/tags/{tag}`.
    pub fn release_url(&self, repo: &RepoId, reference: &ReleaseRef) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid API URL: {}", self.api_url))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("API URL cannot be a base: {}", self.api_url))?;
            segments
                .pop_if_empty()
                .extend(["repos", repo.owner.as_str(), repo.repo.as_str(), "releases"]);
            match reference {
                ReleaseRef::Latest => {
                    segments.push("latest");
                }
                ReleaseRef::Tag(tag) => {
                    segments.extend(["tags", tag.as_str()]);
                }
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl Provider for GitHubProvider {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    #[tracing::instrument(skip(self))]
    async fn get_release(&self, repo: &RepoId, reference: &ReleaseRef) -> Result<ReleaseDescriptor> {
        let url = self.release_url(repo, reference)?;
        debug!("Fetching {} release of {} from {}...", reference, repo, url);

        let release: api::Release = self.http_client.get_json(url.as_str()).await?;
        Ok(release.into())
    }
}

/// Parse a release in GitHub's JSON format.
pub fn parse_release_json(body: &str) -> Result<ReleaseDescriptor> {
    let release: api::Release =
        serde_json::from_str(body).context("Failed to parse GitHub release JSON")?;
    Ok(release.into())
}

impl From<api::Release> for ReleaseDescriptor {
    fn from(r: api::Release) -> Self {
        ReleaseDescriptor {
            tag: r.tag_name,
            name: r.name,
            published_at: r.published_at,
            prerelease: r.prerelease,
            assets: r
                .assets
                .unwrap_or_default()
                .into_iter()
                .map(|a| a.into())
                .collect(),
        }
    }
}

impl From<api::Asset> for ReleaseAsset {
    fn from(a: api::Asset) -> Self {
        ReleaseAsset {
            name: a.name,
            size: a.size,
            download_url: a.browser_download_url,
        }
    }
}
