/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseAsset {
    pub name: String,
    /// Size in bytes, 0 when the host did not report it
    pub size: u64,
    pub download_url: String,
}

impl ReleaseAsset {
    pub fn new(name: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 0,
            download_url: download_url.into(),
        }
    }
}

/// Release metadata as published by the source host.
///
/// Owned by the upstream API; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    /// Version tag (e.g., "v1.0.0")
    pub tag: Option<String>,
    /// Release name/title
    pub name: Option<String>,
    /// Publication date (ISO 8601)
    pub published_at: Option<String>,
    pub prerelease: bool,
    /// Downloadable assets, in upstream order
    pub assets: Vec<ReleaseAsset>,
}
