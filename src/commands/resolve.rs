use anyhow::{Context, Result};
use log::debug;
use std::io::Write;
use std::path::PathBuf;

use crate::application::{DownloadsAction, LoadedRelease};
use crate::domain::model::ReleaseDescriptor;
use crate::domain::service::find_asset;
use crate::platform::PlatformTarget;
use crate::provider::{ReleaseRef, RepoId, parse_release_json};
use crate::runtime::Runtime;

use super::config::Config;
use super::services::build_provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Release tag to fetch instead of the latest release
    pub tag: Option<String>,
    /// Local GitHub release JSON to resolve instead of fetching
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Resolve the download links for a repository and print them to stdout.
#[tracing::instrument(skip(runtime, options))]
pub async fn resolve<R: Runtime>(
    runtime: R,
    repo: Option<String>,
    api_url: Option<String>,
    options: ResolveOptions,
) -> Result<()> {
    let config = Config::load(&runtime, repo.as_deref(), api_url)?;
    let loaded = load_downloads(&runtime, &config, &options).await?;

    let mut stdout = std::io::stdout().lock();
    render(&mut stdout, &loaded, &config.repo, options.format)
}

/// Resolve from the input file when given, otherwise from the release API.
///
/// Only a bad input file is an error; API failures fall back to defaults.
pub(crate) async fn load_downloads<R: Runtime + ?Sized>(
    runtime: &R,
    config: &Config,
    options: &ResolveOptions,
) -> Result<LoadedRelease> {
    if let Some(path) = &options.input {
        debug!("Resolving release from {}", path.display());
        let body = runtime.read_to_string(path)?;
        let descriptor = parse_release_json(&body)
            .with_context(|| format!("Invalid release file {}", path.display()))?;
        return Ok(LoadedRelease::new(Some(descriptor)));
    }

    let reference = match &options.tag {
        Some(tag) => ReleaseRef::Tag(tag.clone()),
        None => ReleaseRef::Latest,
    };
    let provider = build_provider(config)?;
    Ok(DownloadsAction::new(&provider)
        .load(&config.repo, &reference)
        .await)
}

/// Human-readable asset size, `-` when unknown.
fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    match bytes {
        0 => "-".to_string(),
        b if b < KIB => format!("{} B", b),
        b if b < MIB => format!("{:.1} KB", b as f64 / KIB as f64),
        b => format!("{:.1} MB", b as f64 / MIB as f64),
    }
}

fn asset_size(release: Option<&ReleaseDescriptor>, target: PlatformTarget) -> u64 {
    release
        .and_then(|r| find_asset(&r.assets, target))
        .map_or(0, |asset| asset.size)
}

pub(crate) fn render<W: Write>(
    out: &mut W,
    loaded: &LoadedRelease,
    repo: &RepoId,
    format: OutputFormat,
) -> Result<()> {
    let downloads = &loaded.downloads;
    let release = loaded.release.as_ref();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, downloads)
                .context("Failed to serialize downloads")?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            let releases_page = repo.releases_page_url();
            writeln!(out, "{} - Latest version: v{}", repo, downloads.version())?;
            if let Some(name) = release.and_then(|r| r.name.as_deref()) {
                writeln!(out, "Release: {}", name)?;
            }
            if let Some(date) = release.and_then(|r| r.published_at.as_deref()) {
                writeln!(out, "Published: {}", date)?;
            }
            if release.is_some_and(|r| r.prerelease) {
                writeln!(out, "Pre-release")?;
            }
            writeln!(out)?;
            for (target, _) in downloads.links() {
                writeln!(
                    out,
                    "  {:<18} {:<20} {:>9}  {}",
                    target.display_name(),
                    downloads.button_label(target),
                    format_size(asset_size(release, target)),
                    downloads.href(target, &releases_page)
                )?;
            }
        }
    }
    Ok(())
}
