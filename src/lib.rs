pub mod application;
pub mod commands;
pub mod domain;
pub mod http;
pub mod platform;
pub mod provider;
pub mod runtime;

pub use domain::model::{DownloadLink, ReleaseAsset, ReleaseDescriptor, ResolvedDownloads};
pub use domain::service::resolve;
pub use platform::PlatformTarget;
