//! Downloads action - fetches a release and resolves its download links.

use log::{info, warn};

use crate::domain::model::{ReleaseDescriptor, ResolvedDownloads};
use crate::domain::service::resolve;
use crate::provider::{Provider, ReleaseRef, RepoId};

/// A fetched release together with the links resolved from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRelease {
    /// `None` when the fetch failed
    pub release: Option<ReleaseDescriptor>,
    pub downloads: ResolvedDownloads,
}

impl LoadedRelease {
    pub fn new(release: Option<ReleaseDescriptor>) -> Self {
        let downloads = resolve(release.as_ref());
        Self { release, downloads }
    }
}

/// Fetch-then-resolve use case.
///
/// Fetch failures never escape: they are logged and the resolver receives
/// no descriptor.
pub struct DownloadsAction<'a, P: Provider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: Provider + ?Sized> DownloadsAction<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Fetch the release once. Any error becomes `None`.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_descriptor(
        &self,
        repo: &RepoId,
        reference: &ReleaseRef,
    ) -> Option<ReleaseDescriptor> {
        match self.provider.get_release(repo, reference).await {
            Ok(release) => {
                info!(
                    "Fetched {} release of {} ({} assets)",
                    reference,
                    repo,
                    release.assets.len()
                );
                Some(release)
            }
            Err(e) => {
                warn!("Failed to fetch {} release of {}: {:#}", reference, repo, e);
                None
            }
        }
    }

    /// Fetch and resolve. Never fails.
    pub async fn load(&self, repo: &RepoId, reference: &ReleaseRef) -> LoadedRelease {
        LoadedRelease::new(self.fetch_descriptor(repo, reference).await)
    }
}
