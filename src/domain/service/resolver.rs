use crate::domain::model::{
    DEFAULT_VERSION, DownloadLink, ReleaseAsset, ReleaseDescriptor, ResolvedDownloads,
};
use crate::platform::PlatformTarget;

/// Turn an optional release into the version and per-platform download links.
///
/// Total over its input: a missing release, tag or asset list falls back to
/// [`DEFAULT_VERSION`] and unavailable links.
pub fn resolve(descriptor: Option<&ReleaseDescriptor>) -> ResolvedDownloads {
    let version = release_version(descriptor);

    let assets = descriptor.map(|d| d.assets.as_slice()).unwrap_or_default();
    let found = PlatformTarget::ALL.into_iter().filter_map(|target| {
        find_asset(assets, target)
            .map(|asset| (target, DownloadLink::available(&asset.download_url)))
    });

    ResolvedDownloads::new(version, found)
}

/// Display version for a release: the tag minus one leading `v`.
pub fn release_version(descriptor: Option<&ReleaseDescriptor>) -> String {
    match descriptor.and_then(|d| d.tag.as_deref()) {
        Some(tag) => tag.strip_prefix('v').unwrap_or(tag).to_string(),
        None => DEFAULT_VERSION.to_string(),
    }
}

/// First asset, in upstream order, that belongs to `target`.
pub fn find_asset(assets: &[ReleaseAsset], target: PlatformTarget) -> Option<&ReleaseAsset> {
    assets.iter().find(|asset| target.matches(&asset.name))
}
