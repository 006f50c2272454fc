use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::platform::PlatformTarget;

/// Version shown when no release tag is known.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Label used for targets without a published build.
pub const VIEW_RELEASES_LABEL: &str = "View Releases";

static UNAVAILABLE: DownloadLink = DownloadLink::unavailable();

/// Download state of one platform target.
///
/// Availability is derived from the URL, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadLink {
    url: Option<String>,
}

impl DownloadLink {
    pub const fn unavailable() -> Self {
        Self { url: None }
    }

    pub fn available(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.url.is_some()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl Serialize for DownloadLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DownloadLink", 2)?;
        state.serialize_field("available", &self.is_available())?;
        state.serialize_field("url", &self.url)?;
        state.end()
    }
}

/// Version and per-platform links derived from a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDownloads {
    version: String,
    links: BTreeMap<PlatformTarget, DownloadLink>,
}

impl ResolvedDownloads {
    /// Build a result from the links that were found.
    ///
    /// Targets missing from `found` are filled in as unavailable.
    pub fn new(
        version: impl Into<String>,
        found: impl IntoIterator<Item = (PlatformTarget, DownloadLink)>,
    ) -> Self {
        let mut links: BTreeMap<_, _> = PlatformTarget::ALL
            .into_iter()
            .map(|t| (t, DownloadLink::unavailable()))
            .collect();
        links.extend(found);
        Self {
            version: version.into(),
            links,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn link(&self, target: PlatformTarget) -> &DownloadLink {
        self.links.get(&target).unwrap_or(&UNAVAILABLE)
    }

    /// Links in page order.
    pub fn links(&self) -> impl Iterator<Item = (PlatformTarget, &DownloadLink)> {
        PlatformTarget::ALL.into_iter().map(|t| (t, self.link(t)))
    }

    pub fn available_count(&self) -> usize {
        self.links.values().filter(|l| l.is_available()).count()
    }

    /// Button text for a target: its download label, or "View Releases".
    pub fn button_label(&self, target: PlatformTarget) -> &'static str {
        if self.link(target).is_available() {
            target.download_label()
        } else {
            VIEW_RELEASES_LABEL
        }
    }

    /// Link target for a button, falling back when no build is published.
    pub fn href<'a>(&'a self, target: PlatformTarget, fallback: &'a str) -> &'a str {
        self.link(target).url().unwrap_or(fallback)
    }
}

impl Serialize for ResolvedDownloads {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Links<'a>(&'a ResolvedDownloads);

        impl Serialize for Links<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(PlatformTarget::ALL.len()))?;
                for (target, link) in self.0.links() {
                    map.serialize_entry(target.as_str(), link)?;
                }
                map.end()
            }
        }

        let mut state = serializer.serialize_struct("ResolvedDownloads", 2)?;
        state.serialize_field("version", &self.version)?;
        state.serialize_field("links", &Links(self))?;
        state.end()
    }
}
