use anyhow::Result;
use log::debug;

use crate::provider::{DEFAULT_API_URL, DEFAULT_REPO, RepoId};
use crate::runtime::Runtime;

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub repo: RepoId,
    pub api_url: String,
    pub token: Option<String>,
}

impl Config {
    /// Build from CLI overrides, falling back to defaults and `GITHUB_TOKEN`.
    pub fn load<R: Runtime + ?Sized>(
        runtime: &R,
        repo: Option<&str>,
        api_url: Option<String>,
    ) -> Result<Self> {
        let repo: RepoId = repo.unwrap_or(DEFAULT_REPO).parse()?;
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token = runtime
            .env_var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        if let Some(token) = &token {
            debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(token));
        }

        Ok(Self {
            repo,
            api_url,
            token,
        })
    }
}

/// Show only the ends of a token, for logs.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
