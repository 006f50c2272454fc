//! Provider abstraction for release hosts.
//!
//! A provider fetches one release descriptor for a repository. Failures are
//! returned as errors; callers decide whether they are fatal.

mod github;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::domain::model::ReleaseDescriptor;

pub use github::{DEFAULT_API_URL, GitHubProvider, parse_release_json};

/// Repository whose releases feed the download page.
pub const DEFAULT_REPO: &str = "jitenkr2030/Talk-to-Your-Accounts";

/// Repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    /// Human-facing page listing every release.
    pub fn releases_page_url(&self) -> String {
        format!("https://github.com/{}/{}/releases", self.owner, self.repo)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            anyhow::bail!("Invalid repository format. Expected 'owner/repo'.")
        } else {
            Ok(RepoId {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

/// Which release to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReleaseRef {
    #[default]
    Latest,
    Tag(String),
}

impl fmt::Display for ReleaseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseRef::Latest => write!(f, "latest"),
            ReleaseRef::Tag(tag) => write!(f, "tag {}", tag),
        }
    }
}

/// Trait for release hosts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the API base URL.
    fn api_url(&self) -> &str;

    /// Fetch a single release.
    async fn get_release(&self, repo: &RepoId, reference: &ReleaseRef) -> Result<ReleaseDescriptor>;
}
