use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A downloadable build flavour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformTarget {
    Windows,
    Macos,
    LinuxDeb,
    LinuxAppimage,
}

impl PlatformTarget {
    /// Every target, in page order.
    pub const ALL: [PlatformTarget; 4] = [
        PlatformTarget::Windows,
        PlatformTarget::Macos,
        PlatformTarget::LinuxDeb,
        PlatformTarget::LinuxAppimage,
    ];

    /// Lower-case filename suffix an asset must end with.
    pub fn suffix(&self) -> &'static str {
        match self {
            PlatformTarget::Windows => ".exe",
            PlatformTarget::Macos => ".dmg",
            PlatformTarget::LinuxDeb => ".deb",
            PlatformTarget::LinuxAppimage => ".appimage",
        }
    }

    /// Check if an asset file name belongs to this target (case-insensitive).
    pub fn matches(&self, asset_name: &str) -> bool {
        asset_name.to_lowercase().ends_with(self.suffix())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlatformTarget::Windows => "Windows",
            PlatformTarget::Macos => "macOS",
            PlatformTarget::LinuxDeb => "Linux (.deb)",
            PlatformTarget::LinuxAppimage => "Linux (AppImage)",
        }
    }

    /// Label of the download button when a build is published.
    pub fn download_label(&self) -> &'static str {
        match self {
            PlatformTarget::Windows => "Download .exe",
            PlatformTarget::Macos => "Download .dmg",
            PlatformTarget::LinuxDeb => "Download .deb",
            PlatformTarget::LinuxAppimage => "Download .AppImage",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTarget::Windows => "windows",
            PlatformTarget::Macos => "macos",
            PlatformTarget::LinuxDeb => "linux-deb",
            PlatformTarget::LinuxAppimage => "linux-appimage",
        }
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        PlatformTarget::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown platform target: {}. Expected windows, macos, linux-deb, or linux-appimage.",
                    s
                )
            })
    }
}
